use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "secop-taxonomy",
    about = "Classify SECOP II public-works contracts into object, sub-category and macro-category",
    version
)]
pub struct Cli {
    /// Contract records to classify (.csv or .json)
    #[arg(required_unless_present_any = ["fetch", "print_config"], conflicts_with = "fetch")]
    pub input: Option<PathBuf>,

    /// Download records from the open-data API instead of reading INPUT
    #[arg(long)]
    pub fetch: bool,

    /// First signing year to download
    #[arg(long, default_value_t = 2019, conflicts_with_all = ["input", "print_config"])]
    pub from_year: i32,

    /// Last signing year to download (inclusive)
    #[arg(long, default_value_t = 2025, conflicts_with_all = ["input", "print_config"])]
    pub to_year: i32,

    /// Also save the downloaded records before classification (.csv or .json)
    #[arg(long, value_name = "FILE", conflicts_with_all = ["input", "print_config"])]
    pub raw_output: Option<PathBuf>,

    /// Where to write the retained contracts (.csv or .json)
    #[arg(short, long, value_name = "FILE", default_value = "contratos_clasificados.csv")]
    pub output: PathBuf,

    /// Config file [default: ./.secop-taxonomy/config.toml, fallback ~/.config/secop-taxonomy/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Classify every record, skipping the status / sector / family checks
    #[arg(long)]
    pub no_prefilter: bool,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Debug logging and a listing of discarded contracts
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_file() {
        let cli = Cli::try_parse_from(["secop-taxonomy", "contratos.csv"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("contratos.csv")));
        assert_eq!(cli.output, PathBuf::from("contratos_clasificados.csv"));
        assert!(!cli.fetch);
    }

    #[test]
    fn test_fetch_years() {
        let cli = Cli::try_parse_from([
            "secop-taxonomy",
            "--fetch",
            "--from-year",
            "2021",
            "--to-year",
            "2022",
            "-o",
            "out.json",
        ])
        .unwrap();
        assert!(cli.fetch);
        assert_eq!((cli.from_year, cli.to_year), (2021, 2022));
        assert_eq!(cli.output, PathBuf::from("out.json"));
    }

    #[test]
    fn test_requires_input_or_fetch() {
        assert!(Cli::try_parse_from(["secop-taxonomy"]).is_err());
        assert!(Cli::try_parse_from(["secop-taxonomy", "in.csv", "--fetch"]).is_err());
        assert!(Cli::try_parse_from(["secop-taxonomy", "--print-config"]).is_ok());
    }

    #[test]
    fn test_year_flags_need_fetch() {
        assert!(Cli::try_parse_from(["secop-taxonomy", "in.csv", "--from-year", "2020"]).is_err());
        assert!(Cli::try_parse_from(["secop-taxonomy", "in.csv", "--to-year", "2020"]).is_err());
        assert!(Cli::try_parse_from(["secop-taxonomy", "--from-year", "2020"]).is_err());
        assert!(
            Cli::try_parse_from(["secop-taxonomy", "--print-config", "--to-year", "2020"]).is_err()
        );
    }

    #[test]
    fn test_raw_output_needs_fetch() {
        assert!(Cli::try_parse_from(["secop-taxonomy", "in.csv", "--raw-output", "raw.csv"]).is_err());
        let cli =
            Cli::try_parse_from(["secop-taxonomy", "--fetch", "--raw-output", "raw.csv"]).unwrap();
        assert_eq!(cli.raw_output, Some(PathBuf::from("raw.csv")));
    }
}
