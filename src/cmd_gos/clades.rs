use clap::*;
use gos::libs::io::Dataset;
use gos::libs::phylo::ConsistencyOracle;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("clades")
        .about("List the tree-consistent multicolors")
        .after_help(
            r###"
Prints the multicolors that guide every split, one per line, largest first.

* Unrooted (default): both sides of every branch, plus all leaves
* Rooted: the leaves below every node

Examples:
1. gos clades data.json

2. gos clades data.json --rooted

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input dataset. [stdin] for standard input"),
        )
        .arg(
            Arg::new("rooted")
                .long("rooted")
                .action(ArgAction::SetTrue)
                .help("Read the tree as rooted"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let dataset = Dataset::from_file(args.get_one::<String>("infile").unwrap())?;
    let rooted = args.get_flag("rooted") || dataset.config.rooted;

    let oracle = ConsistencyOracle::new(&dataset.tree()?, rooted)?;
    for multicolor in oracle.consistent_multicolors() {
        writer.write_fmt(format_args!("{}\n", multicolor.names().join(",")))?;
    }

    Ok(())
}
