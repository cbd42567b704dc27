//! Markdown summary built purely from a [`RunOutcome`].

use crate::critic::analysis::{AnimationAnalysis, CriticAspect};
use crate::pipeline::controller::{RunOutcome, script_file_name};
use crate::visual::model::class_name;

/// Render the full report for a finished run.
pub fn render(outcome: &RunOutcome) -> String {
    let mut md = format!("# {} Visualization Pipeline Report\n\n", outcome.topic.to_uppercase());
    let Some(last) = outcome.last() else {
        md.push_str("No iterations were run.\n");
        return md;
    };

    let total = last.analyses.len();
    let approved = last.approved_count();
    md.push_str("## Summary\n\n");
    md.push_str(&format!("- **Total Scenes:** {total}\n"));
    md.push_str(&format!("- **Approved Scenes:** {approved}/{total}\n"));
    md.push_str(&format!("- **Average Score:** {:.1}/10\n", last.average_score()));
    let status = if outcome.pipeline_success { "APPROVED" } else { "NEEDS REVISION" };
    md.push_str(&format!("- **Overall Status:** {status}\n"));
    md.push_str(&format!("- **Termination:** {}\n", outcome.termination.as_str()));
    md.push_str(&format!("- **Iterations Run:** {}\n\n", outcome.iterations()));

    md.push_str("## Scene Analysis\n\n");
    for (i, analysis) in last.analyses.iter().enumerate() {
        md.push_str(&format!("### Scene {}: {}\n\n", i + 1, analysis.scene));
        md.push_str(&scene_section(analysis));
        md.push_str("---\n\n");
    }

    md.push_str("## Identified Concepts\n\n");
    if outcome.concepts.is_empty() {
        md.push_str("No lexicon terms were found in the input.\n");
    }
    for c in &outcome.concepts {
        md.push_str(&format!(
            "- **{}** ({}, importance {:.2}): {}\n",
            c.name,
            c.category.as_str(),
            c.importance,
            c.description
        ));
    }
    md.push('\n');

    if !outcome.degradations.is_empty() {
        md.push_str("## Degradations\n\n");
        for d in &outcome.degradations {
            md.push_str(&format!("- {d}\n"));
        }
        md.push('\n');
    }

    md.push_str("## Generated Files\n\n");
    for f in &outcome.files {
        md.push_str(&format!("- `{}`\n", f.display()));
    }
    for v in outcome.videos.iter().chain(&outcome.final_video) {
        md.push_str(&format!("- `{}`\n", v.display()));
    }
    md.push('\n');

    let script = last
        .script_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| script_file_name(&outcome.topic, last.iteration));
    md.push_str("## Usage Instructions\n\n");
    md.push_str("To render specific scenes:\n\n```bash\n");
    for scene in &last.scenes {
        md.push_str(&format!("manim -pql {script} {}\n", class_name(&scene.name)));
    }
    md.push_str("```\n");
    md
}

/// Score, status, feedback grouped by aspect, then recommendation buckets.
pub fn scene_section(analysis: &AnimationAnalysis) -> String {
    let mut md = format!("**Overall Score:** {:.1}/10\n", analysis.overall_score);
    md.push_str(&format!(
        "**Status:** {}\n\n",
        analysis.approval.as_str().to_uppercase()
    ));

    for aspect in CriticAspect::ALL {
        let items: Vec<_> = analysis.feedback.iter().filter(|f| f.aspect == aspect).collect();
        if items.is_empty() {
            continue;
        }
        md.push_str(&format!("#### {}\n", aspect.title()));
        for item in items {
            md.push_str(&format!(
                "- **Score:** {:.1}/10 ({})\n",
                item.score,
                item.severity.as_str()
            ));
            md.push_str(&format!("- **Feedback:** {}\n", item.text));
            if !item.suggestions.is_empty() {
                md.push_str("- **Suggestions:**\n");
                for s in &item.suggestions {
                    md.push_str(&format!("  - {s}\n"));
                }
            }
        }
        md.push('\n');
    }

    if !analysis.recommendations.is_empty() {
        md.push_str("#### Recommended Changes\n\n");
        for (heading, changes) in analysis.recommendations.buckets() {
            md.push_str(&format!("- {heading}:\n"));
            for c in changes {
                md.push_str(&format!("  - {c}\n"));
            }
        }
        md.push('\n');
    }
    md
}

#[cfg(test)]
#[path = "../../tests/unit/report/summary.rs"]
mod tests;
