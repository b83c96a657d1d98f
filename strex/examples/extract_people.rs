//! Person extraction example.
//!
//! Builds a schema, prints the prompt a model would see, and runs a batch of
//! documents through a scripted model that answers in the tag format.
//!
//! Run with:
//! ```bash
//! RUST_LOG=strex=debug cargo run -p strex --example extract_people
//! ```

use serde::{Deserialize, Serialize};
use serde_json::json;
use strex::prelude::*;
use strex::ModelError;
use tracing_subscriber::EnvFilter;

/// A person mentioned in the text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    /// First name.
    pub first_name: String,
    /// Age in years, when stated.
    pub age: Option<u32>,
}

fn schema() -> anyhow::Result<Object> {
    Ok(Object::new("person")?
        .with_description("Personal information about a person")
        .with_many(true)
        .with_attribute(
            Text::new("first_name")?
                .with_description("The first name of a person")
                .with_example("Alice and Bob are friends", json!(["Alice", "Bob"])),
        )
        .with_attribute(
            Number::new("age")?
                .with_description("The age of the person in years")
                .with_example("John is 31 years old", 31),
        ))
}

/// Stands in for a real model: finds "<Name> is <age>" pairs in the input.
fn scripted_answer(input: &PromptInput) -> std::result::Result<String, ModelError> {
    let text = input.last_user_text().unwrap_or_default();
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut answer = String::new();
    for window in words.windows(3) {
        if let [name, "is", age] = window {
            let age = age.trim_end_matches(|c: char| !c.is_ascii_digit());
            if age.is_empty() {
                continue;
            }
            answer.push_str(&format!(
                "<person><first_name>{name}</first_name><age>{age}</age></person>"
            ));
        }
    }
    Ok(answer)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let schema = schema()?;
    let model = FunctionModel::new(scripted_answer)
        .with_name("scripted")
        .chat(true);
    let chain = ExtractionChain::new(
        model,
        schema.clone(),
        ExtractionOptions::new().input_formatter(InputFormatter::TripleQuotes),
    )
    .with_validator(SerdeValidator::<Person>::for_schema(schema));

    println!("=== Prompt ===");
    for message in chain.prompt("Eugene is 18.")?.as_messages().unwrap_or_default() {
        println!("{message}\n");
    }

    println!("=== Batch ===");
    let documents = vec![
        Document::new("Eugene is 18. Nobody else is here.").with_metadata("uid", "a"),
        Document::new("Mia is 7 and Leo is 9.").with_metadata("uid", "b"),
        Document::new("The weather is nice.").with_metadata("uid", "c"),
    ];
    let options = BatchOptions::new()
        .max_concurrency(2)
        .use_uid(true)
        .return_exceptions(true);

    for result in extract_from_documents(&chain, &documents, &options).await? {
        match result {
            Ok(found) => {
                println!("[{}] data: {}", found.source_uid, found.extraction.data);
                println!("[{}] people: {}", found.source_uid, found.extraction.validated_data);
                for error in &found.extraction.errors {
                    println!("[{}] error: {error}", found.source_uid);
                }
            }
            Err(e) => println!("failed: {e}"),
        }
    }

    Ok(())
}
