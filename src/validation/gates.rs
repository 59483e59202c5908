//! Downstream eligibility gates

use super::sections::{has_section, measure};
use crate::config::SectionKeys;
use crate::models::PdfEligibility;
use crate::Analysis;

/// PDF generation needs only an avatar and at least one insight
pub fn pdf_eligibility(analysis: &Analysis, keys: &SectionKeys) -> PdfEligibility {
    if analysis.is_empty() {
        return ineligible("Empty analysis");
    }

    if !has_section(analysis, &keys.avatar) {
        return ineligible("Avatar missing - it is the minimum required for a PDF");
    }

    let insights = analysis.get(&keys.insights).and_then(measure).unwrap_or(0);
    if insights < 1 {
        return ineligible("No insights available for the PDF");
    }

    PdfEligibility {
        eligible: true,
        reason: "Analysis suitable for PDF (flexible criteria)".to_string(),
    }
}

fn ineligible(reason: &str) -> PdfEligibility {
    PdfEligibility {
        eligible: false,
        reason: reason.to_string(),
    }
}
