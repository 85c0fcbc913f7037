//! Annotate - tokenize and tag a piece of text with CoreNLP.
//!
//! This example demonstrates:
//! - Choosing a backend at runtime behind `Box<dyn Client>`
//! - Configuring annotators with a bundle
//! - Cancelling a call with Ctrl-C
//!
//! # Running
//!
//! Against a CoreNLP server:
//!
//! ```text
//! java -mx4g -cp "/opt/corenlp/*" edu.stanford.nlp.pipeline.StanfordCoreNLPServer -port 9000
//! echo "Hello world." | cargo run --example annotate -- --server http://localhost:9000
//! ```
//!
//! With a local installation (one JVM per call):
//!
//! ```text
//! cargo run --example annotate -- --classpath "/opt/corenlp/*" notes.txt
//! ```
//!
//! Set `RUST_LOG=corenlp_client=debug` to see requests and commands.

use std::path::PathBuf;

use corenlp_client::nlp::Document;
use corenlp_client::{annotator, Client, CommandClient, HttpClient};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: annotate [--server URL | --classpath CP] [FILE]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut server = None;
    let mut classpath = None;
    let mut file = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--server" => server = args.next(),
            "--classpath" => classpath = args.next(),
            _ => file = Some(PathBuf::from(arg)),
        }
    }

    let client: Box<dyn Client> = match (server, classpath) {
        (Some(url), _) => Box::new(
            HttpClient::builder()
                .annotators(annotator::BASIC)
                .url(url)
                .build()?,
        ),
        (None, Some(classpath)) => Box::new(
            CommandClient::builder()
                .annotators(annotator::BASIC)
                .classpath(classpath)
                .arg("-Xmx2g")
                .build()?,
        ),
        (None, None) => return Err(USAGE.into()),
    };

    let ctx = CancellationToken::new();
    let on_interrupt = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    // Without a file, annotate whatever arrives on stdin.
    let mut doc = Document::default();
    match file {
        Some(path) => client.run(&ctx, &path, Some(&mut doc)).await?,
        None => {
            let mut text = Vec::new();
            tokio::io::stdin().read_to_end(&mut text).await?;
            client.run_text(&ctx, &text, Some(&mut doc)).await?
        }
    }

    for (i, sentence) in doc.sentence.iter().enumerate() {
        println!("sentence {}", i + 1);
        for token in &sentence.token {
            println!("  {:<16} {:<6} {}", token.word(), token.pos(), token.lemma());
        }
    }
    Ok(())
}
