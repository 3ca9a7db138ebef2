use std::path::Path;

use pagecrop::{ClusterDefinition, CropDefinition, CropPlan, CropRatio, crop_file};

use crate::shared::{cluster_options, load_plan, open_pdf};

pub fn run(
    file: &Path,
    output: &Path,
    plan: Option<&Path>,
    ratios: &[CropRatio],
    exclude: Option<&str>,
) -> Result<(), i32> {
    let info = open_pdf(file)?;
    let page_count = info.page_count();
    // Every cluster gets the same ratios, so an odd/even split would not
    // change the plan.
    let options = cluster_options(false, exclude, page_count)?;

    let mut plan = match plan {
        Some(path) => load_plan(path, page_count)?,
        None => {
            let mut clusters = ClusterDefinition::from_pages(&info.page_summaries(), &options);
            clusters.assign_ratios_to_all(ratios);
            CropPlan::from_clusters(&clusters, page_count)
        }
    };
    for &page in &options.excluded_pages {
        plan.set_ratios(page, Vec::new()).map_err(|e| {
            eprintln!("Error: {e}");
            1
        })?;
    }

    let output_pages = plan.output_page_count();
    let definition = CropDefinition::new(file, output, plan);
    let written = crop_file(&definition).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    println!("Wrote {output_pages} pages to {}", written.display());
    Ok(())
}
