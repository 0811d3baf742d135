use std::env;
use std::path::{Path, PathBuf};

use mrkv_core::io::build_output_path;
use mrkv_core::{GenerateInput, Markov};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Feeds `corpus` into a fresh session and saves it to `store`.
fn build_store(corpus: &Path, store: &Path, seed: u64) -> mrkv_core::Result<Markov> {
    let mut markov = Markov::new(seed);
    let tokens = markov.feed_file(corpus)?;
    tracing::info!(
        tokens,
        nodes = markov.graph().len(),
        edges = markov.graph().edge_count(),
        corpus = %corpus.display(),
        "Fed corpus"
    );

    markov.save_to_store(store)?;
    tracing::info!(store = %store.display(), "Saved graph");
    Ok(markov)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Usage: mrkv-exemple <corpus.txt> [store.mrkv] [seed] [length]
    let mut args = env::args().skip(1);
    let corpus = match args.next() {
        Some(corpus) => PathBuf::from(corpus),
        None => return Err("Usage: mrkv-exemple <corpus.txt> [store.mrkv] [seed] [length]".into()),
    };
    let store = match args.next() {
        Some(store) => PathBuf::from(store),
        None => build_output_path(&corpus, "mrkv")?,
    };
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(11111);
    let length: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(5);

    // Build the graph from the raw corpus, then persist it
    let mut markov = build_store(&corpus, &store, seed)?;

    // Start over from the store with the same seed
    let mut reloaded = Markov::from_store(&store, seed)?;

    // Both sessions walk the same graph with the same seed
    for i in 0..5 {
        let fed = markov.generate_text(length)?;
        let loaded = reloaded.generate_text(length)?;
        println!("Generated chain {}: {}", i + 1, loaded);
        if fed != loaded {
            println!("Should not happen: fed session produced '{}'", fed);
        }
    }

    // A custom start token must exist in the graph
    match reloaded.generate_with(&GenerateInput::new(length).starting_at("unknown-token")) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Custom start rejected: {}", e),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_store_feeds_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("rabbit.txt");
        std::fs::write(&corpus, "Down the rabbit hole.").unwrap();
        let store = build_output_path(&corpus, "mrkv").unwrap();

        let markov = build_store(&corpus, &store, 11111).unwrap();
        assert_eq!(markov.graph().len(), 5);

        let reloaded = Markov::from_store(&store, 11111).unwrap();
        assert_eq!(reloaded.graph().successor_texts("Down"), Some(vec!["the"]));
    }

    #[test]
    fn build_store_reports_missing_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_store(&dir.path().join("absent.txt"), &dir.path().join("absent.mrkv"), 0);
        assert!(matches!(result, Err(mrkv_core::MarkovError::Io(_))));
    }
}
