//! Plain-text rendering of a chart.

use std::fmt::Write;

use crate::chart_types::{ChartResult, Pillar, ResolvedGod, label_or_unknown};
use crate::pillars::ALL_POSITIONS;

fn resolved(god: Option<ResolvedGod>) -> String {
    god.map_or_else(
        || label_or_unknown::<&str>(None),
        |g| format!("{} {} ({})", g.group, g.ten_god, g.element),
    )
}

fn hidden(pillar: &Pillar) -> String {
    pillar
        .hidden_stems
        .iter()
        .map(|h| format!("{}{}", h.stem, h.ten_god.map_or("", |g| g.hanja())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the four pillars as columns, hour first as charts are read.
pub fn render_pillars(chart: &ChartResult) -> String {
    let mut out = String::new();
    let columns: Vec<&Pillar> = ALL_POSITIONS
        .iter()
        .rev()
        .map(|&p| chart.pillars.get(p))
        .collect();

    let row = |out: &mut String, title: &str, cell: &dyn Fn(&Pillar) -> String| {
        let _ = write!(out, "  {title:<8}");
        for pillar in &columns {
            let _ = write!(out, " {:<10}", cell(pillar));
        }
        out.push('\n');
    };

    row(&mut out, "", &|p: &Pillar| p.position.hanja().to_string());
    row(&mut out, "ten god", &|p: &Pillar| {
        p.stem_ten_god.map_or_else(|| "日主".to_string(), |g| g.hanja().to_string())
    });
    row(&mut out, "stem", &|p: &Pillar| p.stem.to_string());
    row(&mut out, "branch", &|p: &Pillar| p.branch.to_string());
    row(&mut out, "ten god", &|p: &Pillar| label_or_unknown(p.branch_ten_god));
    row(&mut out, "hidden", &hidden);
    row(&mut out, "fortune", &|p: &Pillar| label_or_unknown(p.fortune));
    row(&mut out, "killer", &|p: &Pillar| label_or_unknown(p.spirit_killer));
    out
}

/// Full text report of a chart.
pub fn render_chart(chart: &ChartResult) -> String {
    let mut out = String::new();
    if chart.fallback {
        out.push_str("Chart could not be computed; showing fallback values.\n\n");
    }
    if chart.date_substituted {
        out.push_str("Birth date was not understood; today's date was used.\n\n");
    }

    if let Some(adjusted) = chart.adjusted_datetime {
        let _ = writeln!(out, "Adjusted time: {}", adjusted.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(adj) = &chart.adjustment {
        let _ = writeln!(
            out,
            "Timezone:      {} ({:+.1} min{})",
            adj.timezone,
            adj.total_minutes(),
            if adj.is_dst { ", DST" } else { "" }
        );
    }
    if let Some(lunar) = &chart.lunar_date {
        let _ = writeln!(
            out,
            "Lunar date:    {}-{:02}-{:02}{}",
            lunar.year,
            lunar.month,
            lunar.day,
            if lunar.is_leap_month { " (leap)" } else { "" }
        );
    }
    if let Some(term) = &chart.solar_term {
        let _ = writeln!(out, "Solar term:    {} since {}", term.current, term.current_start);
    }
    out.push('\n');
    out.push_str(&render_pillars(chart));
    out.push('\n');

    let a = &chart.archetype;
    let _ = writeln!(
        out,
        "Archetype:     {} ({}, score {:.1})",
        a.archetype_type,
        a.strength.hanja(),
        a.score
    );
    let _ = writeln!(out, "  {}", a.rationale);
    let f = &chart.favorable;
    let _ = writeln!(out, "Favorable:     {}", resolved(f.primary));
    let _ = writeln!(out, "  ally:        {}", resolved(f.ally));
    let _ = writeln!(out, "  adversary:   {}", resolved(f.adversary));
    let _ = writeln!(out, "  enemy:       {}", resolved(f.enemy));

    for o in &chart.boundary_overrides {
        let _ = writeln!(
            out,
            "Override:      {} {} {} -> {}",
            o.rule.name(),
            o.position,
            o.before,
            o.after
        );
    }
    for c in chart.combinations.iter().filter(|c| c.applied()) {
        let _ = writeln!(
            out,
            "Combination:   {:?} at {}-{} -> {}",
            c.kind,
            c.left,
            c.left + 1,
            c.element
        );
    }

    if let Some(luck) = &chart.luck {
        let _ = writeln!(out, "\nLuck cycles ({:?}, from age {}):", luck.direction, luck.start_age);
        for cycle in &luck.cycles {
            let _ = writeln!(
                out,
                "  {:>3}-{:<3} {}  {} / {}",
                cycle.start_age, cycle.end_age, cycle.label, cycle.stem_ten_god, cycle.branch_ten_god
            );
        }
    }
    out
}
