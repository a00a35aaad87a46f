//! Retrieval diagnostics: dump the query analysis, and with a collection
//! supplied, the per-candidate component scores plus each hit's heaviest
//! TF-IDF terms.

use std::env;
use std::path::PathBuf;

use docqa_cli::load_chunks;
use docqa_core::config::Config;
use docqa_core::encode::TermFrequencyEncoder;
use docqa_index::ChunkIndex;
use docqa_query::Lexicon;
use docqa_retrieval::{RankingConfig, Retriever, SearchOptions};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;
    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut chunks_path = None;
    if let Some(flag) = args.iter().position(|a| a == "--chunks") {
        if flag + 1 >= args.len() {
            eprintln!("Error: --chunks requires a path");
            std::process::exit(1);
        }
        chunks_path = Some(PathBuf::from(args.remove(flag + 1)));
        args.remove(flag);
    }
    let Some(question) = args.first() else {
        eprintln!("Usage: docqa-explain \"<question>\" [--chunks <path>]");
        std::process::exit(1);
    };

    let lexicon: Lexicon = config.get("lexicon").unwrap_or_default();
    let ranking: RankingConfig = config.get("retrieval").unwrap_or_default();
    let retriever = Retriever::new(&lexicon, ranking)?;

    let analysis = retriever.analyze(question);
    println!("Query analysis");
    println!("  state:          {}", analysis.state.as_deref().unwrap_or("-"));
    println!(
        "  order type:     {}",
        analysis.order_type.map_or("-", |t| t.as_str())
    );
    println!("  topics:         {}", join_or_dash(&analysis.topics));
    println!("  requires image: {}", analysis.requires_image);
    println!("  question type:  {:?}", analysis.question_type);
    println!("  keywords:       {}", join_or_dash(&analysis.keywords));
    println!("  confidence:     {:.2}", analysis.confidence);

    let Some(chunks_path) = chunks_path else {
        return Ok(());
    };
    let chunks = load_chunks(&chunks_path)?;
    println!("\nLoaded {} chunks from {}", chunks.len(), chunks_path.display());

    // separate index build for the term diagnostics the facade does not expose
    let index = ChunkIndex::build(chunks.clone(), &TermFrequencyEncoder)?;
    retriever.build(chunks)?;

    let results = retriever.search(question, &SearchOptions::default())?;
    println!("\n{} candidate(s) ranked:", results.len());
    for hit in &results {
        let c = &hit.components;
        println!(
            "chunk {} score {:.3} (semantic {:.3}, keyword {:.3}, metadata {:.3}, image {:.3})",
            hit.chunk.id, hit.score, c.semantic, c.keyword, c.metadata, c.image
        );
        let terms: Vec<String> = index
            .keyword
            .top_terms(hit.chunk.id)
            .iter()
            .take(8)
            .map(|(term, weight)| format!("{term} {weight:.2}"))
            .collect();
        println!("  top terms: {}", join_or_dash(&terms));
    }
    Ok(())
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
