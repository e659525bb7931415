use crate::report::{
    ActivityReport, PullRequest, ReportResult, parse_datetime, sort_by_activity, sort_by_age,
};

const TITLE_MAX_LEN: usize = 80;

pub fn format_markdown(report: &ActivityReport, compact: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", report.organization));
    let generated = report
        .generated_at
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "not generated".to_string());
    out.push_str(&format!(
        "_Activity over the last {} days, generated {generated}._\n",
        report.window_days
    ));

    let ReportResult {
        merged_prs,
        open_prs_with_activity,
        open_prs_without_activity,
    } = report.result.clone();

    let mut merged = merged_prs;
    sort_by_age(&mut merged);
    let mut active = open_prs_with_activity;
    sort_by_activity(&mut active);
    let mut stale = open_prs_without_activity;
    sort_by_age(&mut stale);

    push_section(&mut out, "Merged pull requests", &merged, compact, |pr| {
        format!("merged {}", date_label(pr.merged_at.as_deref().unwrap_or_default()))
    });
    push_section(
        &mut out,
        "Open pull requests with activity",
        &active,
        compact,
        |pr| {
            format!(
                "{} events, {} participants",
                pr.activity_event_count, pr.participant_count
            )
        },
    );
    push_section(
        &mut out,
        "Open pull requests without activity",
        &stale,
        compact,
        |pr| format!("opened {}", date_label(&pr.created_at)),
    );

    out
}

fn push_section<F>(out: &mut String, heading: &str, prs: &[PullRequest], compact: bool, detail: F)
where
    F: Fn(&PullRequest) -> String,
{
    out.push_str(&format!("\n## {heading} ({})\n\n", prs.len()));
    if prs.is_empty() {
        out.push_str("_None._\n");
        return;
    }

    for pr in prs {
        let title = truncate(&pr.title);
        if compact {
            out.push_str(&format!(
                "- {}#{} {title} ({})\n",
                pr.repository,
                pr.number,
                detail(pr)
            ));
        } else {
            out.push_str(&format!("- **{}#{}** {title}\n", pr.repository, pr.number));
            out.push_str(&format!("  - {}\n", detail(pr)));
            if !pr.participants.is_empty() {
                let logins: Vec<_> = pr.participants.iter().map(|u| u.login.as_str()).collect();
                out.push_str(&format!("  - participants: {}\n", logins.join(", ")));
            }
        }
    }
}

fn date_label(value: &str) -> String {
    match parse_datetime(value) {
        Some(dt) => dt.date_naive().to_string(),
        None if value.is_empty() => "unknown".to_string(),
        None => value.to_string(),
    }
}

fn truncate(title: &str) -> String {
    let line = title.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= TITLE_MAX_LEN {
        return line.to_string();
    }
    let mut out: String = line.chars().take(TITLE_MAX_LEN).collect();
    out.push_str("...");
    out
}
