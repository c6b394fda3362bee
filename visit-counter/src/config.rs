use {
    std::path::PathBuf,
    clap::{Parser, Subcommand},
};

/// Environment variable holding the counter table name.
pub const TABLE_NAME_ENV: &str = "DYNAMODB_TABLE_NAME";

/// Used when the table name is not configured. No such table exists, so every
/// invocation fails with a store error until the function is configured.
pub const DEFAULT_TABLE_NAME: &str = "NONE";

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CounterConfig {
    pub table_name: String,
    /// Overrides the region resolved by the aws sdk (`AWS_REGION`, profile and so on).
    pub region: Option<String>,
}

impl CounterConfig {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            region: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// True when the table name was never configured.
    pub fn is_unconfigured(&self) -> bool {
        self.table_name == DEFAULT_TABLE_NAME
    }
}

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[arg(long, env = TABLE_NAME_ENV, default_value = DEFAULT_TABLE_NAME)]
    pub table_name: String,

    /// Region of the counter table, resolved by the aws sdk when not set.
    #[arg(long)]
    pub region: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// Serve invocations from the function runtime. Default when no command is given.
    Serve,
    /// Count one visit and print the response envelope.
    Invoke {
        /// Use a local sqlite database instead of DynamoDB.
        #[arg(long)]
        sqlite: Option<PathBuf>,

        /// Create the counter table in the sqlite database if it is missing.
        /// Never done for the unconfigured table name.
        #[arg(long, requires = "sqlite")]
        create_table: bool,
    },
}

impl Args {
    pub fn counter_config(&self) -> CounterConfig {
        let config = CounterConfig::new(self.table_name.clone());
        match &self.region {
            Some(region) => config.with_region(region.clone()),
            None => config,
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
