//! Clustering of a synthetic cloud made of groups of points laid on a grid.
//!
//! The default run reproduces 9 groups of 1000 points in dimension 2, each group in a square
//! of half width 2. and groups 30. apart, with separation ratio 32:
//! ```text
//! cargo run --release --example cloud -- --parallel --csv cloud.csv
//! ```
//! Clusters found are compared with generating groups (nmi) and modularity over the spanner
//! is given. With --heads clusters are read from the decomposition instead of cutting edges.

use clap::{Arg, ArgAction, Command};
use nmi::*;

use cpu_time::ProcessTime;
use std::path::PathBuf;
use std::time::SystemTime;

use wspdcluster::datagen::*;
use wspdcluster::io::*;
use wspdcluster::merit::*;
use wspdcluster::prelude::*;

///  Usage :
///  * --dim : dimension of points (default 2)
///  * --groups : number of groups (default 9)
///  * --size : number of points by group (default 1000)
///  * --radius, --spacing : half width of a group, distance between group centers
///    in units of radius
///  * --separation : separation ratio of the decomposition, must be > 4 (default 32)
///  * --gaussian : gaussian groups instead of uniform
///  * --heads : pair heads clustering instead of the default cut policy
///  * --parallel : run parallel version
///  * --csv, --dump : optional output files
pub fn main() {
    //
    let _ = env_logger::builder().is_test(true).try_init();
    //
    let matches = Command::new("cloud")
        .arg(
            Arg::new("dim")
                .long("dim")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("2")
                .help("dimension of points"),
        )
        .arg(
            Arg::new("groups")
                .long("groups")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("9")
                .help("number of groups"),
        )
        .arg(
            Arg::new("size")
                .long("size")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(usize))
                .default_value("1000")
                .help("number of points in each group"),
        )
        .arg(
            Arg::new("radius")
                .long("radius")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(f64))
                .default_value("2.0"),
        )
        .arg(
            Arg::new("spacing")
                .long("spacing")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(f64))
                .default_value("15.0"),
        )
        .arg(
            Arg::new("separation")
                .long("separation")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(f64))
                .default_value("32.0")
                .help("separation ratio > 4"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(u64))
                .default_value("123456"),
        )
        .arg(Arg::new("gaussian").long("gaussian").action(ArgAction::SetTrue))
        .arg(Arg::new("heads").long("heads").action(ArgAction::SetTrue))
        .arg(Arg::new("parallel").long("parallel").action(ArgAction::SetTrue))
        .arg(
            Arg::new("csv")
                .long("csv")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("dump")
                .long("dump")
                .action(ArgAction::Set)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .get_matches();
    //
    let dim = *matches.get_one::<usize>("dim").unwrap();
    let nb_groups = *matches.get_one::<usize>("groups").unwrap();
    let size = *matches.get_one::<usize>("size").unwrap();
    let radius = *matches.get_one::<f64>("radius").unwrap();
    let spacing = *matches.get_one::<f64>("spacing").unwrap();
    let separation = *matches.get_one::<f64>("separation").unwrap();
    let seed = *matches.get_one::<u64>("seed").unwrap();
    let shape = if matches.get_flag("gaussian") {
        GroupShape::Gaussian
    } else {
        GroupShape::Uniform
    };
    //
    let cloud = match grid_groups(dim, nb_groups, size, radius, spacing, shape, seed) {
        Ok(cloud) => cloud,
        Err(e) => {
            log::error!("could not generate cloud : {}", e);
            std::process::exit(1);
        }
    };
    let policy = if matches.get_flag("heads") {
        CutPolicy::PairHeads
    } else {
        CutPolicy::default()
    };
    let params = match SpannerParams::new(separation).and_then(|p| p.with_cut_policy(policy)) {
        Ok(params) => params.with_parallel(matches.get_flag("parallel")),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let set = PointSet::from_labelled(dim, &cloud.points, &cloud.labels).unwrap();
    //
    let sys_now = SystemTime::now();
    let cpu_start = ProcessTime::now();
    let graph = SpannerGraph::with_params(&set, &params).unwrap();
    println!(
        " spanner sys time(ms) {:?} cpu time(ms) {:?}",
        sys_now.elapsed().unwrap().as_millis(),
        cpu_start.elapsed().as_millis()
    );
    //
    println!(
        "nb points : {}, nb edges : {}, stretch factor : {:.3e}",
        graph.get_nb_points(),
        graph.get_edges().len(),
        graph.get_stretch_factor()
    );
    println!(
        "nb clusters : {}, cut threshold : {:?}",
        graph.get_nb_clusters(),
        graph.get_cut_threshold()
    );
    println!("cluster sizes : {:?}", graph.get_clustering().get_cluster_sizes());
    //
    // merit. reference is first arg so it corresponds to rows
    let algo: Vec<u32> = graph.get_membership().iter().map(|c| *c as u32).collect();
    let ref_hashmap = to_dashmap(&cloud.labels);
    let algo_hashmap = to_dashmap(&algo);
    let contingency = Contingency::<DashAffectation<usize, u32>, usize, u32>::new(
        DashAffectation::new(&ref_hashmap),
        DashAffectation::new(&algo_hashmap),
    );
    contingency.dump_entropies();
    println!("nmi joint : {:.3e}", contingency.get_nmi_joint());
    println!("nmi mean : {:.3e}", contingency.get_nmi_mean());
    println!("nmi sqrt : {:.3e}", contingency.get_nmi_sqrt());
    let (nb_row, _) = contingency.get_dim();
    for i in 0..nb_row {
        log::info!("group : {} {}", i, contingency.get_row(i));
    }
    println!("modularity : {:.3e}", modularity(&graph));
    //
    if let Some(path) = matches.get_one::<PathBuf>("csv") {
        if let Err(e) = dump_membership_csv(path, &graph, &cloud.labels) {
            log::error!("csv dump failed : {}", e);
        }
    }
    if let Some(path) = matches.get_one::<PathBuf>("dump") {
        if let Err(e) = dump_graph_file(path, &graph) {
            log::error!("graph dump failed : {}", e);
        }
    }
} // end of main
