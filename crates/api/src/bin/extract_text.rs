use std::time::Duration;

use anyhow::Result;

use annotate::AnnotateClient;
use extract::Extractor;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: extract_text \"<text>\"");
        std::process::exit(1);
    }
    let text = args[1..].join(" ");

    let endpoint =
        std::env::var("CORENLP_URL").unwrap_or_else(|_| "http://localhost:9000".to_string());
    let client = AnnotateClient::new(endpoint, "depparse".to_string(), Duration::from_secs(15));
    let extractor = Extractor::default();

    let annotated = client.annotate(&text).await?;
    let sentences = extractor.process_document(&annotated);

    println!("text: {}", text);
    for (num, sentence) in sentences.iter().enumerate() {
        println!("\nsentence {}", num + 1);
        println!("-tokens: {:?}", sentence.tokens);
        println!("-relations:");
        for relation in &sentence.relations {
            let subject = &sentence.tokens[relation.subject];
            let predicate: Vec<&str> = relation
                .predicate
                .iter()
                .map(|&token| sentence.tokens[token].as_str())
                .collect();
            let object = &sentence.tokens[relation.object];
            println!(
                "  ({}, {:?}, {}) -> ({}, {}, {})",
                relation.subject,
                relation.predicate,
                relation.object,
                subject,
                predicate.join("-"),
                object
            );
        }
    }

    Ok(())
}
