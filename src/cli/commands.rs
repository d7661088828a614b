// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   smoke       : synthetic end-to-end forward pass
//   describe    : print the architecture for a term table shape
//   init-config : write the default predictor config as JSON
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::{
    describe_use_case::DescribeConfig,
    smoke_use_case::SmokeConfig,
};
use crate::data::synthetic::SyntheticSpec;
use crate::domain::mode::Mode;
use crate::ml::runner::BackendKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one forward pass on random inputs and print the result
    Smoke(SmokeArgs),

    /// Print the predictor structure and parameter count
    Describe(DescribeArgs),

    /// Write the default predictor config to a JSON file
    InitConfig(InitConfigArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    Train,
    Eval,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Train => Mode::Train,
            ModeArg::Eval  => Mode::Eval,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum BackendArg {
    /// NdArray on the CPU
    Cpu,
    /// WGPU on the default GPU adapter
    Gpu,
}

impl From<BackendArg> for BackendKind {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Cpu => BackendKind::Cpu,
            BackendArg::Gpu => BackendKind::Gpu,
        }
    }
}

#[derive(Args, Debug)]
pub struct SmokeArgs {
    /// Number of GO terms in the synthetic term table
    #[arg(long, default_value_t = 10_000)]
    pub num_terms: usize,

    /// Width of each synthetic term embedding
    #[arg(long, default_value_t = 200)]
    pub term_dim: usize,

    /// Number of proteins in the batch
    #[arg(long, default_value_t = 4)]
    pub batch_size: usize,

    /// Width of each protein embedding (overridden by --config)
    #[arg(long, default_value_t = 1280)]
    pub protein_dim: usize,

    /// Skip the labels, so no loss is computed
    #[arg(long)]
    pub no_labels: bool,

    /// Train enables projector dropout and batch statistics
    #[arg(long, value_enum, default_value_t = ModeArg::Train)]
    pub mode: ModeArg,

    #[arg(long, value_enum, default_value_t = BackendArg::Cpu)]
    pub backend: BackendArg,

    /// Seed for the synthetic inputs
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// How many top-scoring terms to print per protein
    #[arg(long, default_value_t = 5)]
    pub top_k: usize,

    /// Predictor config JSON (see `init-config`)
    #[arg(long)]
    pub config: Option<String>,
}

impl From<SmokeArgs> for SmokeConfig {
    fn from(a: SmokeArgs) -> Self {
        SmokeConfig {
            inputs: SyntheticSpec {
                num_terms:   a.num_terms,
                term_dim:    a.term_dim,
                batch_size:  a.batch_size,
                protein_dim: a.protein_dim,
                with_labels: !a.no_labels,
            },
            seed:        a.seed,
            mode:        a.mode.into(),
            backend:     a.backend.into(),
            top_k:       a.top_k,
            config_path: a.config,
        }
    }
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[arg(long, default_value_t = 10_000)]
    pub num_terms: usize,

    #[arg(long, default_value_t = 200)]
    pub term_dim: usize,

    #[arg(long, value_enum, default_value_t = BackendArg::Cpu)]
    pub backend: BackendArg,

    #[arg(long)]
    pub config: Option<String>,
}

impl From<DescribeArgs> for DescribeConfig {
    fn from(a: DescribeArgs) -> Self {
        DescribeConfig {
            num_terms:   a.num_terms,
            term_dim:    a.term_dim,
            backend:     a.backend.into(),
            config_path: a.config,
        }
    }
}

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Where to write the config
    #[arg(long, default_value = "predictor_config.json")]
    pub out: String,
}
