extern crate clap;
use clap::*;

mod cmd_gos;

fn main() -> anyhow::Result<()> {
    let app = Command::new("gos")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`gos` - Genome Order Scaffolder")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log progress to stderr. -v for passes, -vv for every decision"),
        )
        .subcommand(cmd_gos::scaffold::make_subcommand())
        .subcommand(cmd_gos::targets::make_subcommand())
        .subcommand(cmd_gos::clades::make_subcommand())
        .after_help(
            r###"Subcommands:

* scaffold - Identify and apply assembly points
* targets  - List the target multicolors in processing order
* clades   - List the tree-consistent multicolors

All subcommands read one JSON dataset: a tree, breakpoint graph edges and
optional targets, excluded genomes and config.

"###,
        );

    let matches = app.get_matches();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match matches.get_count("verbose") {
        0 => {}
        1 => {
            builder.filter_level(log::LevelFilter::Info);
        }
        _ => {
            builder.filter_level(log::LevelFilter::Debug);
        }
    }
    builder.target(env_logger::Target::Stderr).init();

    match matches.subcommand() {
        Some(("scaffold", sub_matches)) => cmd_gos::scaffold::execute(sub_matches),
        Some(("targets", sub_matches)) => cmd_gos::targets::execute(sub_matches),
        Some(("clades", sub_matches)) => cmd_gos::clades::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
