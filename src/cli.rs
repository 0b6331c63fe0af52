use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub enum CliCommand {
    List {
        watch: Option<u64>,
    },
    Deploy {
        image: String,
        name: String,
        params: Vec<String>,
    },
    Delete {
        ids: Vec<String>,
    },
    Logs {
        id: String,
        lines: Option<u32>,
    },
    Metadata {
        id: String,
    },
}

#[derive(Debug, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub project: Option<String>,
    pub offline: bool,
    pub command: CliCommand,
}

fn string(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

impl From<ArgMatches> for CliArgs {
    fn from(matches: ArgMatches) -> Self {
        let command = match matches.subcommand() {
            Some(("deploy", sub)) => CliCommand::Deploy {
                image: string(sub, "image"),
                name: string(sub, "name"),
                params: strings(sub, "param"),
            },
            Some(("delete", sub)) => CliCommand::Delete {
                ids: strings(sub, "id"),
            },
            Some(("logs", sub)) => CliCommand::Logs {
                id: string(sub, "id"),
                lines: sub.get_one::<u32>("lines").copied(),
            },
            Some(("metadata", sub)) => CliCommand::Metadata {
                id: string(sub, "id"),
            },
            Some(("list", sub)) => CliCommand::List {
                watch: sub.get_one::<u64>("watch").copied(),
            },
            _ => CliCommand::List { watch: None },
        };
        CliArgs {
            config_path: matches.get_one::<PathBuf>("config").cloned(),
            project: matches.get_one::<String>("project").cloned(),
            offline: matches.get_flag("offline"),
            command,
        }
    }
}

fn service_id_arg() -> Arg {
    Arg::new("id")
        .value_name("SERVICE_ID")
        .help("id of the service")
        .required(true)
}

pub(crate) fn build_cli() -> Command {
    let default_watch_interval = env::var("WATCH_INTERVAL").unwrap_or_else(|_| "10".to_string());
    Command::new("servicedeck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("deploy, inspect and remove the services of a project")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("toml configuration file")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("PROJECT_ID")
                .help("project the services belong to")
                .global(true),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .help("work against an in-memory backend holding one demo service")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("list").about("show the services").arg(
                Arg::new("watch")
                    .short('w')
                    .long("watch")
                    .help(format!(
                        "Watch mode: reload every N seconds (default: {default_watch_interval})"
                    ))
                    .value_name("SECONDS")
                    .num_args(0..=1)
                    .default_missing_value(default_watch_interval)
                    .value_parser(clap::value_parser!(u64)),
            ),
        )
        .subcommand(
            Command::new("deploy")
                .about("deploy a new service")
                .arg(
                    Arg::new("image")
                        .long("image")
                        .value_name("IMAGE")
                        .help("container image, e.g. nginx:latest")
                        .required(true),
                )
                .arg(
                    Arg::new("name")
                        .long("name")
                        .value_name("NAME")
                        .help("display name of the service")
                        .required(true),
                )
                .arg(
                    Arg::new("param")
                        .long("param")
                        .value_name("KEY=VALUE")
                        .help("deployment parameter, may be repeated")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("delete")
                .about("delete services")
                .arg(service_id_arg().num_args(1..)),
        )
        .subcommand(
            Command::new("logs")
                .about("print the logs of a service")
                .arg(service_id_arg())
                .arg(
                    Arg::new("lines")
                        .short('n')
                        .long("lines")
                        .value_name("LINES")
                        .help("only the last N lines")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("metadata")
                .about("print the metadata of a service")
                .arg(service_id_arg()),
        )
        .subcommand_required(true)
}

pub(crate) fn configure_cli() -> CliArgs {
    build_cli().get_matches().into()
}
