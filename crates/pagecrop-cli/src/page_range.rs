/// Parse a page list like "1,3-5,9-" into sorted, deduplicated 1-indexed
/// page numbers.
///
/// A range with no end ("9-") runs to the last page. Page 0, reversed
/// ranges and pages beyond `page_count` are rejected.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start = parse_page(start, page_count)?;
                let end = match end.trim() {
                    "" => page_count,
                    end => parse_page(end, page_count)?,
                };
                if start > end {
                    return Err(format!("reversed page range: '{part}'"));
                }
                pages.extend(start..=end);
            }
            None => pages.push(parse_page(part, page_count)?),
        }
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn parse_page(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    if page > page_count {
        return Err(format!(
            "page {page} exceeds document page count ({page_count})"
        ));
    }
    Ok(page)
}
