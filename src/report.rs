use crate::models::AnalysisResult;

/// Renders an analysis as a plain-text report.
///
/// Sections follow the results page: score, deficiency cards, imbalance
/// notices, numbered action steps and the product list.
pub fn render_report(analysis: &AnalysisResult) -> String {
    let mut report = String::new();

    report.push_str(&format!("Wellness Score: {}/100\n", analysis.overall_score));
    report.push_str("Bio-energetic testing can identify exact imbalances.\n");

    report.push_str("\nLikely Deficiencies\n");
    for deficiency in &analysis.deficiencies {
        report.push_str(&format!(
            "- {} - {} Priority\n  Affects: {}\n",
            deficiency.name, deficiency.severity, deficiency.impact
        ));
    }

    report.push_str("\nBio-Energetic Imbalances\n");
    for imbalance in &analysis.imbalances {
        report.push_str(&format!(
            "- {} ({}): {}\n",
            imbalance.system, imbalance.status, imbalance.description
        ));
    }

    report.push_str("\nAction Steps\n");
    for (idx, recommendation) in analysis.recommendations.iter().enumerate() {
        report.push_str(&format!("{}. {}\n", idx + 1, recommendation));
    }

    report.push_str("\nRecommended Products\n");
    for product in &analysis.products {
        report.push_str(&format!(
            "- {} - ${}\n  {}\n",
            product.name, product.price, product.benefit
        ));
    }

    report
}
