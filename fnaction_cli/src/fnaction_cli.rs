// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use clap::Parser;

#[derive(clap::Parser)]
#[command(long_about = None)]
struct Args {
    #[command(flatten)]
    inputs: fnaction_cli::ActionInputs,
    /// TOML file with the inputs, overridden by flags and environment
    #[arg(short, long, default_value_t = String::from(""))]
    config_file: String,
    #[arg(short, long, default_value_t = String::from(""))]
    template: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fnaction_cli::ci_log::init();

    let args = Args::parse();

    // Create a template configuration and exit.
    if !args.template.is_empty() {
        fnaction_cli::create_template(&args.template, fnaction_cli::fnaction_cli_default_conf().as_str())?;
        return Ok(());
    }

    let inputs = match args.config_file.is_empty() {
        true => args.inputs,
        false => args.inputs.or(fnaction_cli::read_conf_from_file(&args.config_file)?),
    };

    match fnaction_cli::run(inputs).await? {
        Some(external_id) => fnaction_cli::output::set_output(fnaction_cli::output::FUNCTION_EXTERNAL_ID, &external_id)?,
        None => log::info!("Remove only, nothing deployed"),
    }
    Ok(())
}
