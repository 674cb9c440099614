use anyhow::Result;

use credence::extract::EntityExtractor;

use super::build_extractor;

pub async fn run(text: &str, format: &str, ner_url: Option<String>) -> Result<()> {
    let extractor = build_extractor(ner_url)?;
    let entities = extractor.extract(text).await?;

    if entities.is_empty() {
        println!("No entities found.");
        return Ok(());
    }

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&entities)?),
        _ => {
            for entity in entities {
                println!("{:<30} {}", entity.name, entity.entity_type);
            }
        }
    }

    Ok(())
}
