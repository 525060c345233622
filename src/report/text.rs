use crate::report::{BlockSummary, SummaryData, format_f64_6};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Stacked Composition Ordering Report\n");
    out.push_str("===================================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Path: {}\n", data.input.path));
    out.push_str(&format!("Format: {}\n", data.input.format));
    out.push_str(&format!("Delimiter: {}\n", data.input.delimiter));
    out.push_str(&format!(
        "Samples: {}\nCategories: {}\nObservations: {}\n\n",
        data.input.n_samples, data.input.n_categories, data.input.n_observations
    ));

    out.push_str("2. Policy\n");
    out.push_str(&format!("Block order: {}\n", data.policy.category_order));
    if let Some(custom) = &data.policy.custom_categories {
        out.push_str(&format!("Custom categories: {}\n", custom.join(", ")));
    }
    out.push_str(&format!("Within-block direction: {}\n", data.policy.direction));
    out.push_str(&format!(
        "Completeness check: {}\n\n",
        if data.policy.strict { "strict" } else { "sparse allowed" }
    ));

    out.push_str("3. Blocks\n");
    for block in &data.blocks {
        out.push_str(&format!("{}\n", block_line(block)));
    }
    out.push_str(&format!("Dominant peak: {}\n\n", dominant_block(&data.blocks)));

    out.push_str("4. Readability\n");
    out.push_str(&format!(
        "Peak-category runs: {} before, {} after\n",
        data.readability.runs_before, data.readability.runs_after
    ));
    out.push_str(&format!(
        "Conclusion: {}\n\n",
        readability_statement(
            data.readability.fragmentation_reduction,
            data.readability.runs_before
        )
    ));

    out.push_str("5. Quality and caveats\n");
    out.push_str(&format!(
        "Median sample total: {}\n",
        format_f64_6(data.total_median)
    ));
    if let Some(expected) = data.policy.expected_total {
        out.push_str(&format!(
            "Samples off expected total {} (+/- {}): {}\n",
            format_f64_6(expected),
            format_f64_6(data.policy.total_tolerance),
            data.n_total_deviations
        ));
    }
    if data.input.n_sparse_samples > 0 {
        out.push_str(&format!(
            "Note: {} samples lack at least one category.\n",
            data.input.n_sparse_samples
        ));
    }

    out
}

fn block_line(block: &BlockSummary) -> String {
    format!(
        "[{}] {}: {} samples ({}), peak {}..{} (median {}), {} -> {}",
        block.block,
        block.category,
        block.n_samples,
        format_f64_6(block.fraction),
        format_f64_6(block.peak_min),
        format_f64_6(block.peak_max),
        format_f64_6(block.peak_median),
        block.first,
        block.last
    )
}

fn dominant_block(blocks: &[BlockSummary]) -> String {
    let mut sorted = blocks.to_vec();
    sorted.sort_by(|a, b| {
        b.n_samples
            .cmp(&a.n_samples)
            .then_with(|| a.category.cmp(&b.category))
    });
    sorted
        .first()
        .map(|b| format!("{} ({})", b.category, format_f64_6(b.fraction)))
        .unwrap_or_else(|| "none".to_string())
}

fn readability_statement(reduction: f64, runs_before: usize) -> &'static str {
    if runs_before <= 1 {
        "single block; ordering leaves the chart unchanged"
    } else if reduction >= 0.5 {
        "reordering strongly consolidates the sample axis"
    } else if reduction > 0.0 {
        "reordering moderately consolidates the sample axis"
    } else {
        "input was already grouped by peak category"
    }
}
