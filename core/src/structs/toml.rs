use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LnkToml {
    pub output: Output,
    /**Options used when creating or patching `Shortcut` files. Defaults are used if missing */
    #[serde(default)]
    pub write: WriteOptions,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Output {
    /**Name of the sub directory that holds the log files */
    pub name: String,
    /**Log to a file under this directory. Log to the terminal if missing */
    pub directory: Option<String>,
    /**Logging level: `error`, `warn`, `info`, `debug`. Default is `warn` */
    pub logging: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WriteOptions {
    pub short_names: ShortNames,
    /**Check the target path for directory and file size metadata */
    pub probe_target: bool,
    pub show_command: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            short_names: ShortNames::Estimate,
            probe_target: true,
            show_command: 1,
        }
    }
}

/// How 8.3 names are generated for the target path
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShortNames {
    #[default]
    Estimate,
    /**Ask the OS. Only possible on Windows when the target exists */
    System,
}
