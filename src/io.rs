//! Export of results: membership as csv and binary dump/reload of a whole graph.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::spanner::SpannerGraph;

// one csv line
#[derive(Debug, Serialize, Deserialize)]
struct MemberRecord {
    #[serde(rename = "Id")]
    id: usize,
    #[serde(rename = "Label")]
    label: u32,
    #[serde(rename = "Cluster")]
    cluster: usize,
}

fn check_labels(graph: &SpannerGraph, labels: &[u32]) -> anyhow::Result<()> {
    if labels.len() != graph.get_nb_points() {
        return Err(anyhow!(
            "nb labels {} differs from nb points {}",
            labels.len(),
            graph.get_nb_points()
        ));
    }
    Ok(())
}

/// writes a csv with header Id,Label,Cluster.
/// labels are reference labels of points (in point order)
pub fn write_membership_csv<W: Write>(
    writer: W,
    graph: &SpannerGraph,
    labels: &[u32],
) -> anyhow::Result<()> {
    check_labels(graph, labels)?;
    let mut wtr = csv::Writer::from_writer(writer);
    for (id, (label, cluster)) in labels.iter().zip(graph.get_membership()).enumerate() {
        wtr.serialize(MemberRecord {
            id,
            label: *label,
            cluster: *cluster,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// dumps membership in a csv file, see [write_membership_csv]
pub fn dump_membership_csv(
    path: &Path,
    graph: &SpannerGraph,
    labels: &[u32],
) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| anyhow!("could not open {:?} : {}", path, e))?;
    write_membership_csv(BufWriter::new(file), graph, labels)?;
    log::info!("membership of {} points dumped in {:?}", labels.len(), path);
    Ok(())
}

/// reads back (label, cluster) of each point from a membership csv
pub fn read_membership_csv<R: Read>(reader: R) -> anyhow::Result<(Vec<u32>, Vec<usize>)> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut labels = Vec::<u32>::new();
    let mut membership = Vec::<usize>::new();
    for (num_record, result) in rdr.deserialize().enumerate() {
        let record: MemberRecord = result?;
        if record.id != num_record {
            return Err(anyhow!("record {} has id {}", num_record, record.id));
        }
        labels.push(record.label);
        membership.push(record.cluster);
    }
    Ok((labels, membership))
}

/// binary dump of a graph (edges and clustering)
pub fn dump_graph<W: Write>(writer: W, graph: &SpannerGraph) -> anyhow::Result<()> {
    let mut out = BufWriter::new(writer);
    bincode::serialize_into(&mut out, graph)
        .map_err(|e| anyhow!("graph serialization failed : {}", e))?;
    out.flush()?;
    Ok(())
}

/// reloads a graph dumped by [dump_graph]
pub fn reload_graph<R: Read>(reader: R) -> anyhow::Result<SpannerGraph> {
    bincode::deserialize_from(BufReader::new(reader))
        .map_err(|e| anyhow!("graph deserialization failed : {}", e))
}

pub fn dump_graph_file(path: &Path, graph: &SpannerGraph) -> anyhow::Result<()> {
    let file = File::create(path).map_err(|e| anyhow!("could not create {:?} : {}", path, e))?;
    dump_graph(file, graph)?;
    log::info!("graph with {} edges dumped in {:?}", graph.get_edges().len(), path);
    Ok(())
}

pub fn reload_graph_file(path: &Path) -> anyhow::Result<SpannerGraph> {
    let file = File::open(path).map_err(|e| anyhow!("could not open {:?} : {}", path, e))?;
    reload_graph(file)
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn small_graph() -> SpannerGraph {
        let points = vec![
            vec![0f64, 0.],
            vec![0., 1.],
            vec![40., 0.],
            vec![40., 1.],
            vec![0.5, 0.5],
        ];
        SpannerGraph::new(2, &points, 8).unwrap()
    }

    #[test]
    fn membership_csv() {
        let graph = small_graph();
        let labels = vec![7, 7, 3, 3, 7];
        let mut buffer = Vec::<u8>::new();
        write_membership_csv(&mut buffer, &graph, &labels).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Id,Label,Cluster");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[3], "2,3,1");
        //
        let (read_labels, membership) = read_membership_csv(buffer.as_slice()).unwrap();
        assert_eq!(read_labels, labels);
        assert_eq!(membership, graph.get_membership());
        //
        assert!(write_membership_csv(Vec::<u8>::new(), &graph, &[1, 2]).is_err());
    }

    #[test]
    fn dump_reload() {
        let graph = small_graph();
        let mut path = std::env::temp_dir();
        path.push(format!("wspdcluster_dump_{}.bin", std::process::id()));
        dump_graph_file(&path, &graph).unwrap();
        let reloaded = reload_graph_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(reloaded, graph);
        //
        assert!(reload_graph(&[1u8, 2, 3][..]).is_err());
    }
}
