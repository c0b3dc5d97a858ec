use super::utils;
use clap::*;
use gos::libs::io::Dataset;
use gos::libs::scaffold::{AssemblyRecord, Scaffolder};
use itertools::Itertools;
use log::info;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("scaffold")
        .about("Identify and apply assembly points")
        .after_help(
            r###"
Joins open fragment ends of the target genomes, one target multicolor at a
time. Each pass scores the candidate joins on the current breakpoint graph,
keeps a conflict-free best set and applies it before the next pass starts.

Output is one TSV line per assembly point and joined genome:

    v1  v2  genome  score  before  after  repeat  support  target_split

* `repeat` is `-` for plain joins
* `support` lists the target genomes already adjacent at v1 -- v2, or `-`
* `target_split` lists the tree-consistent parts of the target, `;` separated

Notes:
* Targets default to the dataset's `targets`, then to every leaf of the tree
  that is not excluded.
* Excluded genomes are complete: their open ends are never joined.
* `--target` and `--exclude` accept repeated or comma separated names and
  replace the lists from the dataset.
* `--repeats`, `--rooted` and `--parallel` override the dataset `config`.
* `--graph` writes the dataset back with the scaffolded edges.

Examples:
1. Scaffold every genome:
   gos scaffold data.json

2. Scaffold two genomes, treating c as complete:
   gos scaffold data.json -t a,b -e c

3. Join through repeats, with 4 threads:
   gos scaffold data.json --repeats -p 4

4. Keep the scaffolded graph:
   gos scaffold data.json --json --graph scaffolded.json

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
            Arg::new("repeats")
                .long("repeats")
                .action(ArgAction::SetTrue)
                .help("Join through tagged repeat ends"),
        )
        .arg(
            Arg::new("rooted")
                .long("rooted")
                .action(ArgAction::SetTrue)
                .help("Only clades of the rooted tree guide the splits"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .value_parser(value_parser!(usize))
                .help("Number of threads [default: 1]"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Write the assembly points as JSON"),
        )
        .arg(
            Arg::new("graph")
                .long("graph")
                .num_args(1)
                .help("Write the scaffolded dataset to this file"),
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
    //----------------------------
    // Args
    //----------------------------
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let infile = args.get_one::<String>("infile").unwrap();

    let mut dataset = Dataset::from_file(infile)?;
    let config = utils::config(args, &dataset);
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallel)
        .build_global()?;

    let tree = dataset.tree()?;
    let exclude = utils::exclude(args, &dataset);
    let requested = utils::requested(args, &dataset, &tree, &exclude);

    //----------------------------
    // Operating
    //----------------------------
    let mut scaffolder = Scaffolder::new(dataset.graph()?, &tree, exclude, &config)?;
    let records = scaffolder.run(&requested)?;

    //----------------------------
    // Output
    //----------------------------
    if args.get_flag("json") {
        writer.write_fmt(format_args!("{}\n", serde_json::to_string_pretty(&records)?))?;
    } else {
        for record in &records {
            for line in tsv_lines(record) {
                writer.write_fmt(format_args!("{}\n", line))?;
            }
        }
    }

    if let Some(outfile) = args.get_one::<String>("graph") {
        dataset.set_graph(scaffolder.graph());
        let mut graph_writer = intspan::writer(outfile);
        graph_writer.write_fmt(format_args!("{}\n", dataset.to_json()?))?;
        info!("scaffolded dataset written to {}", outfile);
    }

    Ok(())
}

fn tsv_lines(record: &AssemblyRecord) -> Vec<String> {
    let point = &record.point;
    let repeat = point.repeat.as_deref().unwrap_or("-");
    let support = if point.s_support.is_empty() {
        "-".to_string()
    } else {
        point.s_support.join(",")
    };
    let split = record
        .target_split
        .iter()
        .map(|part| part.names().join(","))
        .join(";");

    record
        .target
        .names()
        .iter()
        .map(|genome| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                point.v1,
                point.v2,
                genome,
                point.score,
                point.before,
                point.after,
                repeat,
                support,
                split
            )
        })
        .collect()
}
