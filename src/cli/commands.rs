use crate::error::Error;
use clap::Parser;
use std::path::PathBuf;

/// Deterministic Go dependency recipes for cacheable container build layers
#[derive(Parser, Debug)]
#[command(
    name = "gocook",
    about = "Deterministic Go dependency recipes for cacheable container build layers",
    version,
    author,
    long_about = "gocook splits a Go container build in two. --prepare records the external \
                  imports of every .go file, grouped by build constraint, together with go.mod \
                  and go.sum in a recipe that only changes when the import set does. --cook \
                  turns that recipe into a throwaway program and runs 'go build' on it, so \
                  the dependency compilation lands in its own cacheable layer.\n\n\
                  Examples:\n  \
                  gocook --prepare recipe.json\n  \
                  gocook --cook recipe.json\n  \
                  gocook --cook recipe.json --tags netgo,osusergo"
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Prepare a recipe with information on dependencies and write it to FILE"
    )]
    pub prepare: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Build all the dependencies specified by the recipe FILE"
    )]
    pub cook: Option<PathBuf>,

    #[arg(
        long,
        value_name = "TAGS",
        help = "Set the -tags flag to use with 'go build'. Only affects --cook"
    )]
    pub tags: Option<String>,

    #[arg(
        short = 'C',
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Module root to prepare from or cook into"
    )]
    pub dir: PathBuf,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

/// The single operation one invocation performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Prepare { output: PathBuf },
    Cook { recipe: PathBuf, tags: Option<String> },
}

fn non_empty(path: &Option<PathBuf>) -> Option<PathBuf> {
    path.as_ref().filter(|p| !p.as_os_str().is_empty()).cloned()
}

impl CliArgs {
    /// Resolves the flags into exactly one mode. Empty values count as absent.
    pub fn mode(&self) -> Result<Mode, Error> {
        let tags = self.tags.as_ref().filter(|t| !t.is_empty()).cloned();

        match (non_empty(&self.prepare), non_empty(&self.cook)) {
            (Some(_), Some(_)) | (None, None) => Err(Error::Usage(
                "Must provide exactly one of --prepare or --cook".to_string(),
            )),
            (Some(_), None) if tags.is_some() => Err(Error::Usage(
                "Cannot specify --tags with --prepare".to_string(),
            )),
            (Some(output), None) => Ok(Mode::Prepare { output }),
            (None, Some(recipe)) => Ok(Mode::Cook { recipe, tags }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use yare::parameterized;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("gocook").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_prepare_mode() {
        let args = parse(&["--prepare", "recipe.json"]);
        assert_eq!(
            args.mode().unwrap(),
            Mode::Prepare {
                output: PathBuf::from("recipe.json")
            }
        );
        assert_eq!(args.dir, PathBuf::from("."));
    }

    #[test]
    fn test_cook_mode_with_tags() {
        let args = parse(&["--cook", "recipe.json", "--tags", "netgo", "-C", "/src"]);
        assert_eq!(
            args.mode().unwrap(),
            Mode::Cook {
                recipe: PathBuf::from("recipe.json"),
                tags: Some("netgo".to_string()),
            }
        );
        assert_eq!(args.dir, PathBuf::from("/src"));
    }

    #[parameterized(
        neither = { &[] },
        both = { &["--prepare", "a.json", "--cook", "b.json"] },
        tags_with_prepare = { &["--prepare", "a.json", "--tags", "netgo"] },
        tags_alone = { &["--tags", "netgo"] },
        empty_prepare = { &["--prepare", ""] },
    )]
    fn test_usage_errors(args: &[&str]) {
        let err = parse(args).mode().unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn test_empty_tags_allowed_with_prepare() {
        let args = parse(&["--prepare", "a.json", "--tags", ""]);
        assert!(matches!(args.mode(), Ok(Mode::Prepare { .. })));
    }

    #[test]
    fn test_empty_cook_value_counts_as_absent() {
        let args = parse(&["--prepare", "a.json", "--cook", ""]);
        assert!(matches!(args.mode(), Ok(Mode::Prepare { .. })));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["gocook", "--prepare", "a", "-v", "-q"]);
        assert!(result.is_err());
    }
}
