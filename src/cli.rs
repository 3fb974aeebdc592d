use crate::throttle::DEFAULT_DELAY;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_INPUT_FILE: &str = "Scientific Name.xlsx";
pub const DEFAULT_OUTPUT_FILE: &str = "POWO_Accepted_Names_Output.xlsx";

#[derive(Parser, Debug)]
#[command(author, version, about = "Check scientific plant names against POWO accepted names", long_about = None)]
pub struct Cli {
    /// Spreadsheet (or CSV/TSV) with a single column of scientific names.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_INPUT_FILE)]
    pub input_file: PathBuf,

    /// Where to write the names with their accepted name and author.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Pause after each POWO request, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_DELAY.as_millis() as u64)]
    pub delay_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["powo-names"]);
        assert_eq!(cli.input_file, PathBuf::from("Scientific Name.xlsx"));
        assert_eq!(
            cli.output_file,
            PathBuf::from("POWO_Accepted_Names_Output.xlsx")
        );
        assert_eq!(cli.delay_ms, 500);
    }

    #[test]
    fn test_cli_overrides() {
        let args = vec![
            "powo-names",
            "-i",
            "names.csv",
            "-o",
            "checked.csv",
            "--delay-ms",
            "0",
        ];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.input_file, PathBuf::from("names.csv"));
        assert_eq!(cli.output_file, PathBuf::from("checked.csv"));
        assert_eq!(cli.delay_ms, 0);
    }

    #[test]
    fn test_cli_rejects_bad_delay() {
        assert!(Cli::try_parse_from(["powo-names", "--delay-ms", "soon"]).is_err());
    }
}
