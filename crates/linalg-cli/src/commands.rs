//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use linalg_ui::core::Operation;
use linalg_ui::ui::Section;
use linalg_ui::visualization::PlotCapability;
use std::path::PathBuf;

/// Linalg: terminal client for the linear-algebra calculator backend
///
/// Vector and matrix arguments are JSON, e.g. `[1,2,3]` or `[[1,2],[3,4]]`.
#[derive(Parser, Debug)]
#[command(name = "linalg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend base URL [default: http://127.0.0.1:5000]
    #[arg(long, env = "LINALG_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// YAML client configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only failures are printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands, one per calculator section
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a vector
    UnitVector(UnitVectorArgs),
    /// Angle between two vectors, in degrees
    Angle(PairArgs),
    /// Check whether two vectors are orthogonal
    Orthogonality(PairArgs),
    /// Check whether two vectors are parallel
    Parallelism(PairArgs),
    /// Weighted sum of vectors
    LinearCombination(LinearCombinationArgs),
    /// Solve Ax = b
    Solve(SolveArgs),
    /// Transpose a matrix
    Transpose(TransposeArgs),
    /// Multiply two matrices
    Multiply(MultiplyArgs),
    /// Plot one or two vectors from the origin
    Visualize(VisualizeArgs),
}

/// Arguments for `unit-vector`
#[derive(Args, Debug)]
pub struct UnitVectorArgs {
    /// Vector, e.g. [3,4]
    #[arg(long, default_value = "", hide_default_value = true)]
    pub vector: String,
}

/// Two vectors
#[derive(Args, Debug)]
pub struct PairArgs {
    /// First vector
    #[arg(long, default_value = "", hide_default_value = true)]
    pub v1: String,

    /// Second vector
    #[arg(long, default_value = "", hide_default_value = true)]
    pub v2: String,
}

/// Arguments for `linear-combination`
#[derive(Args, Debug)]
pub struct LinearCombinationArgs {
    /// Vectors, e.g. [[1,0],[0,1]]
    #[arg(long, default_value = "", hide_default_value = true)]
    pub vectors: String,

    /// One coefficient per vector, e.g. [2,3]
    #[arg(long, default_value = "", hide_default_value = true)]
    pub coefficients: String,
}

/// Arguments for `solve`
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Coefficient matrix A
    #[arg(long = "a", default_value = "", hide_default_value = true)]
    pub a: String,

    /// Right-hand side b
    #[arg(long = "b", default_value = "", hide_default_value = true)]
    pub b: String,
}

/// Arguments for `transpose`
#[derive(Args, Debug)]
pub struct TransposeArgs {
    /// Matrix, e.g. [[1,2],[3,4]]
    #[arg(long, default_value = "", hide_default_value = true)]
    pub matrix: String,
}

/// Arguments for `multiply`
#[derive(Args, Debug)]
pub struct MultiplyArgs {
    /// Left matrix
    #[arg(long, default_value = "", hide_default_value = true)]
    pub m1: String,

    /// Right matrix
    #[arg(long, default_value = "", hide_default_value = true)]
    pub m2: String,
}

/// Arguments for `visualize`
#[derive(Args, Debug)]
pub struct VisualizeArgs {
    /// First vector
    #[arg(long, default_value = "", hide_default_value = true)]
    pub v1: String,

    /// Optional second vector
    #[arg(long, default_value = "", hide_default_value = true)]
    pub v2: String,

    /// Plot mode
    #[arg(long, default_value = "3d")]
    pub mode: PlotMode,

    /// Print the scene as JSON
    #[arg(long)]
    pub json: bool,
}

/// Plot mode argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlotMode {
    /// 3D traces
    #[default]
    #[value(name = "3d")]
    ThreeD,
    /// 2D canvas projection
    #[value(name = "2d")]
    TwoD,
}

impl From<PlotMode> for PlotCapability {
    fn from(mode: PlotMode) -> Self {
        match mode {
            PlotMode::ThreeD => Self::Rich3d,
            PlotMode::TwoD => Self::Canvas2d,
        }
    }
}

/// One field filled from a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInput<'a> {
    /// Page field id
    pub field_id: &'static str,
    /// Flag that supplied the text
    pub flag: &'static str,
    /// Raw text
    pub text: &'a str,
}

impl Commands {
    /// Page section this command drives
    #[must_use]
    pub const fn section(&self) -> Section {
        match self {
            Self::UnitVector(_) => Section::Operation(Operation::UnitVector),
            Self::Angle(_) => Section::Operation(Operation::AngleBetween),
            Self::Orthogonality(_) => Section::Operation(Operation::Orthogonality),
            Self::Parallelism(_) => Section::Operation(Operation::Parallelism),
            Self::LinearCombination(_) => Section::Operation(Operation::LinearCombination),
            Self::Solve(_) => Section::Operation(Operation::SolveSystem),
            Self::Transpose(_) => Section::Operation(Operation::Transpose),
            Self::Multiply(_) => Section::Operation(Operation::Multiply),
            Self::Visualize(_) => Section::Visualization,
        }
    }

    /// Flag texts in the section's field order
    #[must_use]
    pub fn inputs(&self) -> Vec<FieldInput<'_>> {
        let inputs: Vec<(&'static str, &str)> = match self {
            Self::UnitVector(a) => vec![("--vector", a.vector.as_str())],
            Self::Angle(a) | Self::Orthogonality(a) | Self::Parallelism(a) => {
                vec![("--v1", a.v1.as_str()), ("--v2", a.v2.as_str())]
            }
            Self::LinearCombination(a) => {
                vec![
                    ("--vectors", a.vectors.as_str()),
                    ("--coefficients", a.coefficients.as_str()),
                ]
            }
            Self::Solve(a) => vec![("--a", a.a.as_str()), ("--b", a.b.as_str())],
            Self::Transpose(a) => vec![("--matrix", a.matrix.as_str())],
            Self::Multiply(a) => vec![("--m1", a.m1.as_str()), ("--m2", a.m2.as_str())],
            Self::Visualize(a) => vec![("--v1", a.v1.as_str()), ("--v2", a.v2.as_str())],
        };
        self.section()
            .field_ids()
            .iter()
            .zip(inputs)
            .map(|(&field_id, (flag, text))| FieldInput {
                field_id,
                flag,
                text,
            })
            .collect()
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
