//! The `quizforge quote` commands.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizforge_core::config::QuizforgeConfig;
use quizforge_core::quotes::QuoteStore;

pub fn random(config: &QuizforgeConfig, seed: Option<u64>) -> Result<()> {
    let store = QuoteStore::new(&config.quotes_path);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    match store.random(&mut rng)? {
        Some(quote) => println!("{quote}"),
        None => println!("No quotes yet. Add one with: quizforge quote add \"...\""),
    }
    Ok(())
}

pub fn add(config: &QuizforgeConfig, text: &str) -> Result<()> {
    let store = QuoteStore::new(&config.quotes_path);
    store.append(text)?;
    println!("Quote added to {}", store.path().display());
    Ok(())
}

pub fn list(config: &QuizforgeConfig) -> Result<()> {
    let store = QuoteStore::new(&config.quotes_path);
    let quotes = store.list()?;
    if quotes.is_empty() {
        println!("No quotes yet.");
        return Ok(());
    }
    for (i, quote) in quotes.iter().enumerate() {
        println!("{:>3}. {quote}", i + 1);
    }
    Ok(())
}
