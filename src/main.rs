use anyhow::Result;
use clap::Parser;
use peinfo::{Analyzer, Classifier, CommandClassifier};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to the PE file to analyze
    #[arg(short, long)]
    input: String,

    /// Render the report through the `binpage.html` template on stdout
    /// instead of plain text
    #[arg(long)]
    html: bool,

    /// External classifier program, invoked as `<classifier> <input>`
    #[arg(short, long)]
    classifier: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let file = File::open(&args.input)?;
    let analyzer = Analyzer::new(file, args.input.clone())?;

    let classifier = args.classifier.map(CommandClassifier::new);
    let report = analyzer.analyze(classifier.as_ref().map(|c| c as &dyn Classifier))?;

    if args.html {
        let page = peinfo::render_html(&report, Path::new("."))?;
        io::stdout().write_all(page.as_bytes())?;
    } else {
        println!("{report}");
    }

    Ok(())
}
