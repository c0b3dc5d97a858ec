use clap::ArgMatches;
use gos::libs::config::ScaffoldConfig;
use gos::libs::io::Dataset;
use gos::libs::multicolor::{Genome, Multicolor};
use gos::libs::phylo::Tree;

// Genome names supplied by --<id> and --<id>-file; None when neither is given
fn genome_names(args: &ArgMatches, id: &str) -> Option<Vec<String>> {
    let file_id = format!("{}-file", id);
    let mut names: Vec<String> = Vec::new();
    let mut given = false;

    if args.contains_id(id) {
        given = true;
        for value in args.get_many::<String>(id).into_iter().flatten() {
            names.extend(
                value
                    .split(',')
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_string()),
            );
        }
    }

    if args.contains_id(&file_id) {
        given = true;
        if let Some(file) = args.get_one::<String>(&file_id) {
            names.extend(intspan::read_first_column(file));
        }
    }

    given.then_some(names)
}

/// Genomes considered complete: the command line wins over the dataset.
pub fn exclude(args: &ArgMatches, dataset: &Dataset) -> Multicolor {
    match genome_names(args, "exclude") {
        Some(names) => Multicolor::from_names(&names),
        None => dataset.exclude(),
    }
}

/// Genomes to scaffold. Without any request, every leaf that is not excluded.
pub fn requested(args: &ArgMatches, dataset: &Dataset, tree: &Tree, exclude: &Multicolor) -> Multicolor {
    let names = match genome_names(args, "target") {
        Some(names) => names,
        None if !dataset.targets.is_empty() => dataset.targets.clone(),
        None => tree
            .get_leaf_names()
            .into_iter()
            .filter(|name| !exclude.contains(&Genome::new(name.as_str())))
            .collect(),
    };
    Multicolor::from_names(&names)
}

/// Dataset settings with command line overrides applied. A subcommand only overrides the
/// settings it defines arguments for.
pub fn config(args: &ArgMatches, dataset: &Dataset) -> ScaffoldConfig {
    let mut config = dataset.config.clone();
    if let Ok(Some(&true)) = args.try_get_one::<bool>("repeats") {
        config.repeats = true;
    }
    if let Ok(Some(&true)) = args.try_get_one::<bool>("rooted") {
        config.rooted = true;
    }
    if let Ok(Some(parallel)) = args.try_get_one::<usize>("parallel") {
        config.parallel = *parallel;
    }
    config
}
