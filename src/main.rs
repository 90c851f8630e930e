use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction};
use tracing_subscriber::EnvFilter;
use uritemplate::{vars_from_json, Template, TemplateResolver, Value, Vars};

fn main() -> Result<()> {
    let matches = clap::Command::new("uritemplate")
        .about("Expand an RFC 6570 URI template")
        .arg(
            Arg::new("template")
                .value_name("TEMPLATE")
                .required(true)
                .help("URI template to expand, e.g. 'https://example.com/{user}{?q}'"),
        )
        .arg(
            Arg::new("vars")
                .short('f')
                .long("vars")
                .value_name("FILE")
                .help("Path to a YAML or JSON file mapping names to values"),
        )
        .arg(
            Arg::new("set")
                .short('s')
                .long("set")
                .value_name("NAME=VALUE")
                .action(ArgAction::Append)
                .help("Set a string variable, overriding the vars file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log parsing and expansion details to stderr"),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let mut vars = match matches.get_one::<String>("vars") {
        Some(path) => load_vars(path)?,
        None => Vars::new(),
    };

    for assignment in matches.get_many::<String>("set").into_iter().flatten() {
        let (name, value) = parse_assignment(assignment)?;
        vars.insert(name.to_string(), Value::from(value));
    }

    let raw = matches
        .get_one::<String>("template")
        .context("missing template argument")?;
    let template: Template = raw
        .parse()
        .with_context(|| format!("Invalid template: {}", raw))?;

    for name in TemplateResolver::new().missing_variables(&template, &vars) {
        tracing::debug!(name, "variable left undefined");
    }

    let expanded = template
        .expand(&vars)
        .with_context(|| format!("Could not expand: {}", raw))?;
    println!("{}", expanded);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_vars(path: &str) -> Result<Vars> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Could not read file: {}", path))?;
    // YAML is a superset of JSON, so one reader covers both
    let json: serde_json::Value = serde_yaml::from_str(&text)
        .with_context(|| format!("Invalid vars file: {}", path))?;
    Ok(vars_from_json(json)?)
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => bail!("Expected NAME=VALUE but got '{}'", assignment),
    }
}
