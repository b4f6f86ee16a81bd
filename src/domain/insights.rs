//! Narrative observations derived from statistics and growth.

use crate::domain::commodity::{CommodityCategory, CommodityDefinition};
use crate::domain::generator::PriceModel;
use crate::domain::statistics::StatisticsTable;
use crate::domain::trend::GrowthMap;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, PartialEq)]
pub struct InsightSection {
    pub title: String,
    pub lines: Vec<String>,
}

impl InsightSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }
}

pub struct InsightInputs<'a> {
    pub stats: &'a StatisticsTable,
    pub growth: &'a GrowthMap,
    pub commodities: &'a [CommodityDefinition],
    pub model: &'a PriceModel,
    pub top_k: usize,
}

pub fn compose(inputs: &InsightInputs) -> Vec<InsightSection> {
    vec![
        high_risk(inputs),
        stable(inputs),
        highest_growth(inputs),
        seasonal_patterns(inputs),
        recommendations(),
    ]
}

fn high_risk(inputs: &InsightInputs) -> InsightSection {
    let mut section = InsightSection::new("High-risk commodities (volatile)");
    for (i, (name, cv)) in inputs.stats.most_volatile(inputs.top_k).iter().enumerate() {
        section.lines.push(format!("{}. {}", i + 1, name));
        section.lines.push(format!("   - Volatility: {cv:.2}%"));
        if let Some(s) = inputs.stats.get(name) {
            section.lines.push(format!(
                "   - Price range: {} - {}",
                fmt_rupiah(s.min),
                fmt_rupiah(s.max)
            ));
        }
    }
    section
}

fn stable(inputs: &InsightInputs) -> InsightSection {
    let mut section = InsightSection::new("Stable commodities");
    for (i, (name, cv)) in inputs.stats.most_stable(inputs.top_k).iter().enumerate() {
        section.lines.push(format!("{}. {}", i + 1, name));
        section.lines.push(format!("   - Volatility: {cv:.2}%"));
        if let Some(s) = inputs.stats.get(name) {
            section
                .lines
                .push(format!("   - Average price: {}", fmt_rupiah(s.mean)));
        }
    }
    section
}

fn highest_growth(inputs: &InsightInputs) -> InsightSection {
    let mut section = InsightSection::new("Highest price growth");
    for (i, (name, pct)) in inputs.growth.top(inputs.top_k).iter().enumerate() {
        section.lines.push(format!("{}. {}: {:+.2}%", i + 1, name, pct));
    }
    section
}

fn seasonal_patterns(inputs: &InsightInputs) -> InsightSection {
    let mut section = InsightSection::new("Seasonal patterns");
    let chilis = names_where(inputs.commodities, |c| *c == CommodityCategory::Chili);
    if !chilis.is_empty() {
        section.lines.push(format!(
            "- {}: highest prices in the rainy season ({}), +{:.0}%",
            chilis.join(", "),
            month_span(&inputs.model.chili_spike.months),
            (inputs.model.chili_spike.multiplier - 1.0) * 100.0
        ));
    }
    section.lines.push(format!(
        "- Ramadan/Lebaran ({}): demand spike of +{:.0}% across all commodities",
        month_span(&inputs.model.holiday_spike.months),
        (inputs.model.holiday_spike.multiplier - 1.0) * 100.0
    ));
    let supported = names_where(inputs.commodities, CommodityCategory::is_price_supported);
    if !supported.is_empty() {
        section.lines.push(format!(
            "- {}: stable through the year (price support)",
            supported.join(", ")
        ));
    }
    section
}

fn recommendations() -> InsightSection {
    let mut section = InsightSection::new("Recommendations");
    let lines = [
        "1. Consumers",
        "   - Buy chili and shallots during the main harvest (Jul-Aug)",
        "   - Stock staples 2-3 weeks before Ramadan",
        "   - Switch protein sources (chicken vs eggs) with relative prices",
        "2. Traders and retailers",
        "   - Build chili and shallot inventory ahead of the rainy season",
        "   - Hedge prices on volatile commodities",
        "   - Focus margin on stable products (rice, sugar)",
        "3. Government",
        "   - Buffer-stock intervention for chili (highest volatility)",
        "   - Tight distribution monitoring around national holidays",
        "   - Improve cold-storage infrastructure for vegetables",
    ];
    section.lines.extend(lines.iter().map(|l| l.to_string()));
    section
}

fn names_where(
    commodities: &[CommodityDefinition],
    pred: impl Fn(&CommodityCategory) -> bool,
) -> Vec<&str> {
    commodities
        .iter()
        .filter(|c| pred(&c.category))
        .map(|c| c.name.as_str())
        .collect()
}

/// "Dec-Feb" for [12, 1, 2]; first and last month as listed.
fn month_span(months: &[u32]) -> String {
    let abbr = |m: u32| MONTH_ABBR[((m + 11) % 12) as usize];
    match (months.first(), months.last()) {
        (Some(&a), Some(&b)) if a == b => abbr(a).to_string(),
        (Some(&a), Some(&b)) => format!("{}-{}", abbr(a), abbr(b)),
        _ => String::from("-"),
    }
}

/// "Rp 15,500"; whole units with thousands separators.
pub fn fmt_rupiah(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
