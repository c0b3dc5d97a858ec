use super::utils;
use clap::*;
use gos::libs::io::Dataset;
use gos::libs::scaffold::Scaffolder;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("targets")
        .about("List the target multicolors in processing order")
        .after_help(
            r###"
Expands the requested genomes into the target multicolors that `scaffold`
processes, one per line, largest first:

    a,b
    a
    b

Targets and excluded genomes are resolved as in `gos scaffold`.

Examples:
1. Targets of every genome not excluded:
   gos targets data.json

2. Targets of a and b under the rooted tree:
   gos targets data.json -t a -t b --rooted

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
            Arg::new("target")
                .long("target")
                .short('t')
                .num_args(1)
                .action(ArgAction::Append)
                .help("Genomes to scaffold"),
        )
        .arg(
            Arg::new("target-file")
                .long("target-file")
                .num_args(1)
                .help("Genomes to scaffold, one per line"),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .short('e')
                .num_args(1)
                .action(ArgAction::Append)
                .help("Complete genomes"),
        )
        .arg(
            Arg::new("exclude-file")
                .long("exclude-file")
                .num_args(1)
                .help("Complete genomes, one per line"),
        )
        .arg(
            Arg::new("rooted")
                .long("rooted")
                .action(ArgAction::SetTrue)
                .help("Only clades of the rooted tree guide the splits"),
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

    let config = utils::config(args, &dataset);
    let tree = dataset.tree()?;
    let exclude = utils::exclude(args, &dataset);
    let requested = utils::requested(args, &dataset, &tree, &exclude);

    let scaffolder = Scaffolder::new(dataset.graph()?, &tree, exclude, &config)?;
    for target in scaffolder.targets(&requested)? {
        writer.write_fmt(format_args!("{}\n", target.names().join(",")))?;
    }

    Ok(())
}
