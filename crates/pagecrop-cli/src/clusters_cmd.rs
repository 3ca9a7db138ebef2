use std::path::Path;

use pagecrop::{ClusterDefinition, PageCluster};
use tracing::info;

use crate::cli::OutputFormat;
use crate::shared::{cluster_options, open_pdf};

fn page_list(pages: &[usize]) -> String {
    pages
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn describe(index: usize, cluster: &PageCluster) -> String {
    let mut line = format!(
        "Cluster {}: {} x {} ({} pages{})",
        index + 1,
        cluster.rounded_page_width(),
        cluster.rounded_page_height(),
        cluster.all_pages().len(),
        if cluster.is_excluded() {
            ", excluded"
        } else {
            ""
        }
    );
    line.push_str(&format!("\n  Pages: {}", page_list(cluster.all_pages())));
    line.push_str(&format!("\n  Preview: {}", page_list(cluster.pages_to_merge())));
    line
}

pub fn run(
    file: &Path,
    split_odd_even: bool,
    exclude: Option<&str>,
    format: &OutputFormat,
) -> Result<(), i32> {
    let info = open_pdf(file)?;
    let options = cluster_options(split_odd_even, exclude, info.page_count())?;
    let clusters = ClusterDefinition::from_pages(&info.page_summaries(), &options);
    info!(
        pages = info.page_count(),
        clusters = clusters.len(),
        "clustered pages"
    );

    match format {
        OutputFormat::Text => {
            for (index, cluster) in clusters.clusters().iter().enumerate() {
                println!("{}", describe(index, cluster));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&clusters).map_err(|e| {
                eprintln!("Error: failed to serialize clusters: {e}");
                1
            })?;
            println!("{json}");
        }
    }

    Ok(())
}
