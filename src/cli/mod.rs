// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, hands the work to Layer 2,
// and prints the results. Nothing here computes.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DescribeArgs, InitConfigArgs, SmokeArgs};

use crate::ml::model::AnnotationPredictorConfig;

#[derive(Parser, Debug)]
#[command(
    name = "go-term-predictor",
    version = "0.1.0",
    about = "Predict Gene-Ontology term annotations from protein embeddings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Smoke(args)      => Self::run_smoke(args),
            Commands::Describe(args)   => Self::run_describe(args),
            Commands::InitConfig(args) => Self::run_init_config(args),
        }
    }

    fn run_smoke(args: SmokeArgs) -> Result<()> {
        use crate::application::smoke_use_case::SmokeUseCase;

        let report = SmokeUseCase::new(args.into()).execute()?;

        println!("{}", report.structure);
        println!(
            "Parameters: {} trainable, {} frozen (term table)",
            report.num_params, report.frozen_params,
        );
        println!("Logits shape: {:?}", report.logits_shape);
        match report.loss {
            Some(loss) => println!("Loss: {loss:.6}"),
            None       => println!("Loss: (no labels)"),
        }

        for (protein, terms) in report.top_terms.iter().enumerate() {
            let ranked: Vec<String> = terms
                .iter()
                .map(|t| format!("{}={:.4} ({:+.3})", t.term, t.probability, t.logit))
                .collect();
            println!("Protein {protein}: {}", ranked.join(", "));
        }
        Ok(())
    }

    fn run_describe(args: DescribeArgs) -> Result<()> {
        use crate::application::describe_use_case::DescribeUseCase;

        let summary = DescribeUseCase::new(args.into()).execute()?;
        println!("{}", summary.structure);
        println!(
            "Terms: {} x {} | Parameters: {} trainable, {} frozen (term table)",
            summary.num_terms, summary.term_dim, summary.num_params, summary.frozen_params,
        );
        Ok(())
    }

    fn run_init_config(args: InitConfigArgs) -> Result<()> {
        use crate::infra::config_store::ConfigStore;

        let store = ConfigStore::new(&args.out);
        store.save(&AnnotationPredictorConfig::new())?;
        println!("Wrote default predictor config to '{}'", store.path().display());
        Ok(())
    }
}
