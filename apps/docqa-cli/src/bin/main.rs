use std::env;
use std::path::PathBuf;

use docqa_cli::{format_context, load_chunks};
use docqa_core::config::Config;
use docqa_query::Lexicon;
use docqa_retrieval::{RankingConfig, Retriever, SearchOptions};
use tracing_subscriber::EnvFilter;

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {prog} <ask|stats> [args...]");
    eprintln!("  ask \"<question>\" [--chunks <path>] [--max-results <n>]");
    eprintln!("  stats [--chunks <path>]");
    std::process::exit(1);
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        usage(&prog);
    }
    let cmd = args.remove(0);

    let mut question = None;
    let mut chunks_path = None;
    let mut max_results = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--chunks" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --chunks requires a path");
                    std::process::exit(1);
                }
                chunks_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--max-results" => {
                let Some(n) = args.get(i + 1).and_then(|raw| raw.parse::<usize>().ok()) else {
                    eprintln!("Error: --max-results requires a number");
                    std::process::exit(1);
                };
                max_results = Some(n);
                i += 1;
            }
            other if !other.starts_with('-') => question = Some(other.to_string()),
            other => {
                eprintln!("Unknown flag: {other}");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let chunks_path = chunks_path.unwrap_or_else(|| {
        let path: String = config
            .get("data.chunks_path")
            .unwrap_or_else(|_| "./chunks.json".to_string());
        PathBuf::from(path)
    });
    let lexicon: Lexicon = config.get("lexicon").unwrap_or_default();
    let ranking: RankingConfig = config.get("retrieval").unwrap_or_default();

    match cmd.as_str() {
        "ask" => {
            let Some(question) = question else {
                eprintln!("Usage: {prog} ask \"<question>\"");
                std::process::exit(1);
            };
            let chunks = load_chunks(&chunks_path)?;
            println!("Loaded {} chunks from {}", chunks.len(), chunks_path.display());

            let retriever = Retriever::new(&lexicon, ranking)?;
            retriever.build(chunks)?;

            let options = SearchOptions {
                max_results,
                ..SearchOptions::default()
            };
            let results = retriever.search(&question, &options)?;
            if results.is_empty() {
                println!("No matching chunks.");
                return Ok(());
            }

            println!("\nTop {} result(s):", results.len());
            for (position, hit) in results.iter().enumerate() {
                let c = &hit.components;
                println!(
                    "{}. chunk {} score {:.3} (semantic {:.3}, keyword {:.3}, metadata {:.3}, image {:.3})",
                    position + 1,
                    hit.chunk.id,
                    hit.score,
                    c.semantic,
                    c.keyword,
                    c.metadata,
                    c.image
                );
            }
            println!("\n--- prompt ---\n{}", format_context(&question, &results));
        }
        "stats" => {
            let chunks = load_chunks(&chunks_path)?;
            let retriever = Retriever::new(&lexicon, ranking)?;
            retriever.build(chunks)?;
            let stats = retriever.stats()?;
            println!("Chunks:             {}", stats.chunks);
            println!("Vocabulary terms:   {}", stats.vocabulary);
            println!("Tagged states:      {}", stats.tagged_states);
            println!("Tagged sections:    {}", stats.tagged_sections);
            println!("Tagged topics:      {}", stats.tagged_topics);
            println!("Chunks with images: {}", stats.chunks_with_images);
        }
        _ => usage(&prog),
    }
    Ok(())
}
