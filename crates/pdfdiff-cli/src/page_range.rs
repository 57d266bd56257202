/// Parse a page range string like "1,3-5" into a sorted list of 0-indexed page numbers.
///
/// Input is 1-indexed (user-facing). Output is 0-indexed. `page_count` is
/// the larger page count of the two documents being compared.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (start, end) = match part.split_once('-') {
            Some((start, end)) => (parse_page(start)?, parse_page(end)?),
            None => {
                let page = parse_page(part)?;
                (page, page)
            }
        };
        if start > end {
            return Err(format!("descending page range: '{part}'"));
        }
        if end > page_count {
            return Err(format!(
                "page {end} exceeds the larger document's page count ({page_count})"
            ));
        }
        pages.extend((start..=end).map(|p| p - 1));
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn parse_page(text: &str) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    Ok(page)
}
