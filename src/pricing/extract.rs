use scraper::{ElementRef, Html, Selector};

/// Element holding the last price on a fund page.
const FUND_PRICE_SELECTOR: &str = "[data-testid='initial-data-last']";

/// Cells after the ticker that may hold the last price.
const STOCK_PRICE_CELL_RANGE: std::ops::Range<usize> = 1..6;

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Last price from a fund detail page, exactly as displayed.
pub fn extract_fund_price(html: &str) -> Option<String> {
    let selector = Selector::parse(FUND_PRICE_SELECTOR).ok()?;
    let document = Html::parse_document(html);

    document
        .select(&selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// Last price of `code` from the share listing table.
///
/// A row matches when its ticker cell (`td.sorting_1`, else the first cell)
/// contains `code`; the price is the first of the following cells that looks
/// like `123,45` or `123.45`.
pub fn extract_stock_price(html: &str, code: &str) -> Option<String> {
    if code.is_empty() {
        return None;
    }

    let row_selector = Selector::parse("tbody tr").ok()?;
    let ticker_selector = Selector::parse("td.sorting_1").ok()?;
    let cell_selector = Selector::parse("td").ok()?;
    let document = Html::parse_document(html);

    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
        let Some(ticker_cell) = row.select(&ticker_selector).next().or_else(|| cells.first().copied())
        else {
            continue;
        };

        if !element_text(ticker_cell).to_uppercase().contains(code) {
            continue;
        }

        let end = STOCK_PRICE_CELL_RANGE.end.min(cells.len());
        let start = STOCK_PRICE_CELL_RANGE.start.min(end);
        if let Some(price) = cells[start..end]
            .iter()
            .map(|cell| element_text(*cell))
            .find(|text| looks_like_price(text))
        {
            return Some(price);
        }
    }

    None
}

/// `digits [.,] digits`, nothing else.
fn looks_like_price(text: &str) -> bool {
    let Some(sep) = text.find(['.', ',']) else {
        return false;
    };
    let (whole, frac) = (&text[..sep], &text[sep + 1..]);

    !whole.is_empty()
        && !frac.is_empty()
        && whole.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}
