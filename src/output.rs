use anyhow::{Context, Result};
use chrono::Local;
use console::style;
use csv::Writer;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{AnalysisResults, CompatibilityEntry, ParentPair};
use crate::i18n::{Lang, Text};
use crate::inheritance::{punnett_grid, Distribution, Outcome};
use crate::systems::{AboSystem, RhSystem};
use crate::types::*;

/// Supported report formats
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Styled summary on stdout
    #[default]
    Text,
    Html,
    Json,
    Csv,
    All,
}

/// Renders analysis results for display or to report files
pub struct ReportGenerator {
    output_dir: PathBuf,
    lang: Lang,
}

impl ReportGenerator {
    pub fn new(output_dir: &Path, lang: Lang) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            lang,
        }
    }

    /// Generate the report in the requested format(s). Text goes to
    /// stdout; file formats land in the output directory with a
    /// timestamped name.
    pub fn generate(&self, results: &AnalysisResults, format: ReportFormat) -> Result<()> {
        match format {
            ReportFormat::Text => self.print_text_report(results),
            ReportFormat::Html => self.generate_html_report(results)?,
            ReportFormat::Json => self.generate_json_report(results)?,
            ReportFormat::Csv => self.generate_csv_report(results)?,
            ReportFormat::All => {
                self.print_text_report(results);
                self.generate_html_report(results)?;
                self.generate_json_report(results)?;
                self.generate_csv_report(results)?;
            }
        }

        Ok(())
    }

    fn report_path(&self, extension: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output_dir.display()
            )
        })?;
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        Ok(self
            .output_dir
            .join(format!("report_{}.{}", timestamp, extension)))
    }

    fn t(&self, key: Text) -> &'static str {
        self.lang.text(key)
    }

    /* ---------- text ---------- */

    fn print_text_report(&self, results: &AnalysisResults) {
        let parents = &results.parents;

        println!();
        println!("{}", style(self.t(Text::Title)).bold().cyan());
        println!(
            "  {} {}   {} {}",
            self.t(Text::FatherBloodGroup),
            style(parents.abo_rh.father).bold(),
            self.t(Text::MotherBloodGroup),
            style(parents.abo_rh.mother).bold()
        );

        if results.risks.contains(&RiskKind::RhIncompatibility) {
            println!();
            println!(
                "{} {} {}",
                style("!").yellow().bold(),
                style(self.t(Text::RhWarningTitle)).yellow().bold(),
                style(self.t(Text::RhWarningBody)).yellow()
            );
        }

        self.print_punnett_squares(parents.abo_rh.father, parents.abo_rh.mother);

        println!();
        println!("{}", style(self.t(Text::OutcomeProbabilities)).bold());
        for outcome in results.abo_rh.outcomes() {
            println!(
                "  -> {}: {}",
                self.style_abo_rh(outcome.phenotype),
                style(format_percent(outcome.probability)).bold()
            );
        }

        self.print_compatibility(&results.compatibility);
        self.print_risks(results);
        self.print_extra_systems(results);
        println!();
    }

    fn print_punnett_squares(&self, father: AboRh, mother: AboRh) {
        let (dad_abo, mum_abo, abo_cells) = punnett_grid::<AboSystem>(father.abo, mother.abo);

        println!();
        println!("{}", style(self.t(Text::AboSquareTitle)).bold());
        println!("  {}", style(self.t(Text::AboSquareDesc)).dim());
        print!("       ");
        for allele in &dad_abo {
            print!("{}", style(format!("{:^5}", allele)).bold());
        }
        println!();
        for (row, m_allele) in mum_abo.iter().enumerate() {
            print!("  {}", style(format!("{:^5}", m_allele)).bold());
            for cell in &abo_cells[row] {
                print!("{}", self.paint_abo(*cell, format!("{:^5}", cell)));
            }
            println!();
        }
        println!("  {}", style(self.t(Text::ParentsPassTitle)).underlined());
        println!(
            "  {} {}. {} {}.",
            self.t(Text::MotherCanPass),
            style(human_join(&unique(&mum_abo), self.t(Text::Or))).bold(),
            self.t(Text::FatherCanPass),
            style(human_join(&unique(&dad_abo), self.t(Text::Or))).bold()
        );
        println!("  {}", style(self.t(Text::EachCellShows)).dim());

        let (dad_rh, mum_rh, rh_cells) = punnett_grid::<RhSystem>(father.rh, mother.rh);

        println!();
        println!("{}", style(self.t(Text::RhSquareTitle)).bold());
        println!("  {}", style(self.t(Text::RhSquareDesc)).dim());
        print!("       ");
        for allele in &dad_rh {
            print!("{}", style(format!("{:^5}", allele)).bold());
        }
        println!();
        for (row, m_allele) in mum_rh.iter().enumerate() {
            print!("  {}", style(format!("{:^5}", m_allele)).bold());
            for cell in &rh_cells[row] {
                let padded = format!("{:^5}", cell);
                let styled = match cell {
                    RhFactor::Positive => style(padded).green(),
                    RhFactor::Negative => style(padded).red(),
                };
                print!("{}", styled);
            }
            println!();
        }
        println!("  {}", style(self.t(Text::GreenBoxesPositive)).dim());
    }

    fn print_compatibility(&self, entries: &[CompatibilityEntry]) {
        println!();
        println!("{}", style(self.t(Text::CompatibilityChecker)).bold());
        println!("  {}", style(self.t(Text::PossibleBabyTypes)).dim());
        for entry in entries {
            println!(
                "  {} {} {} {} {}.",
                self.style_abo_rh(entry.phenotype),
                self.t(Text::ReceiveFrom),
                join_labels(&entry.can_receive_from),
                self.t(Text::DonateTo),
                join_labels(&entry.can_donate_to)
            );
        }
        println!(
            "  {} {}",
            style(self.t(Text::RelativeDonationTitle)).yellow().bold(),
            style(self.t(Text::RelativeDonationBody)).yellow()
        );
    }

    fn print_risks(&self, results: &AnalysisResults) {
        let findings = results.findings(self.lang);
        if findings.is_empty() {
            return;
        }

        println!();
        println!("{}", style(self.t(Text::GeneticRisks)).bold().red());
        for finding in findings {
            println!("  {}", style(&finding.title).red().bold());
            println!("    {}", finding.description);
        }
    }

    fn print_extra_systems(&self, results: &AnalysisResults) {
        if results.kell.is_none() && results.mn.is_none() && results.duffy.is_none() {
            return;
        }

        println!();
        println!("{}", style(self.t(Text::OtherSystems)).bold().cyan());
        if let (Some(pair), Some(dist)) = (results.parents.kell, &results.kell) {
            self.print_extra_panel(self.t(Text::KellTitle), pair, dist);
        }
        if let (Some(pair), Some(dist)) = (results.parents.mn, &results.mn) {
            self.print_extra_panel(self.t(Text::MnTitle), pair, dist);
        }
        if let (Some(pair), Some(dist)) = (results.parents.duffy, &results.duffy) {
            self.print_extra_panel(self.t(Text::DuffyTitle), pair, dist);
        }
    }

    fn print_extra_panel<P: Clone + PartialEq + Display>(
        &self,
        title: &str,
        pair: ParentPair<P>,
        distribution: &Distribution<P>,
    ) {
        println!();
        println!("  {}", style(title).bold());
        println!(
            "    {}: {}   {}: {}",
            self.t(Text::SelectorFather),
            style(&pair.father).bold(),
            self.t(Text::SelectorMother),
            style(&pair.mother).bold()
        );
        for outcome in distribution.outcomes() {
            println!(
                "    -> {}: {}",
                style(&outcome.phenotype).bold(),
                format_percent(outcome.probability)
            );
        }
    }

    fn paint_abo(&self, abo: AboType, text: String) -> console::StyledObject<String> {
        match abo {
            AboType::A => style(text).red(),
            AboType::B => style(text).blue(),
            AboType::Ab => style(text).magenta(),
            AboType::O => style(text).dim(),
        }
    }

    fn style_abo_rh(&self, phenotype: AboRh) -> console::StyledObject<String> {
        self.paint_abo(phenotype.abo, phenotype.to_string())
    }

    /* ---------- html ---------- */

    fn generate_html_report(&self, results: &AnalysisResults) -> Result<()> {
        let path = self.report_path("html")?;
        let html = self.create_html_content(results);
        fs::write(&path, html)
            .with_context(|| format!("Failed to write HTML report to {}", path.display()))?;
        Ok(())
    }

    fn create_html_content(&self, results: &AnalysisResults) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        format!(
            r#"<!DOCTYPE html>
<html lang="{}">
<head>
    <meta charset="UTF-8">
    <title>{}</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; background-color: #f5f5f5; }}
        .container {{ max-width: 900px; margin: 0 auto; background-color: white; padding: 30px; border-radius: 10px; box-shadow: 0 0 10px rgba(0,0,0,0.1); }}
        h1, h2, h3 {{ color: #2c3e50; }}
        table {{ border-collapse: collapse; margin: 16px 0; }}
        th, td {{ border: 1px solid #ddd; padding: 8px 14px; text-align: center; }}
        .abo-A {{ background-color: #fecaca; }}
        .abo-B {{ background-color: #bfdbfe; }}
        .abo-AB {{ background-color: #e9d5ff; }}
        .abo-O {{ background-color: #e5e7eb; }}
        .rh-pos {{ background-color: #bbf7d0; }}
        .rh-neg {{ background-color: #fecdd3; }}
        .warning {{ background-color: #fef9c3; border-radius: 6px; padding: 12px; margin: 16px 0; color: #854d0e; }}
        .risks {{ background-color: #fff1f2; border-radius: 6px; padding: 12px; margin: 16px 0; }}
        .risks div {{ border-left: 4px solid #fb7185; padding-left: 8px; margin: 8px 0; }}
        .note {{ color: #6b7280; font-size: 0.9em; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>{}</h1>
        <p class="note">{}</p>
        <p>{} <strong>{}</strong> &middot; {} <strong>{}</strong></p>
        {}
        {}
        {}
        {}
        {}
        {}
    </div>
</body>
</html>"#,
            match self.lang {
                Lang::En => "en",
                Lang::Bn => "bn",
            },
            self.t(Text::Title),
            self.t(Text::Title),
            timestamp,
            self.t(Text::FatherBloodGroup),
            results.parents.abo_rh.father,
            self.t(Text::MotherBloodGroup),
            results.parents.abo_rh.mother,
            self.html_punnett_squares(results),
            self.html_distribution(results),
            self.html_compatibility(&results.compatibility),
            self.html_relative_donation(),
            self.html_risks(results),
            self.html_extra_systems(results),
        )
    }

    fn html_punnett_squares(&self, results: &AnalysisResults) -> String {
        let father = results.parents.abo_rh.father;
        let mother = results.parents.abo_rh.mother;

        let (dad_abo, mum_abo, abo_cells) = punnett_grid::<AboSystem>(father.abo, mother.abo);
        let mut html = format!(
            "<h2>{}</h2>\n<p class=\"note\">{}</p>\n<table>\n<tr><th></th>",
            self.t(Text::AboSquareTitle),
            self.t(Text::AboSquareDesc)
        );
        for allele in &dad_abo {
            html.push_str(&format!("<th>{}</th>", allele));
        }
        html.push_str("</tr>\n");
        for (row, m_allele) in mum_abo.iter().enumerate() {
            html.push_str(&format!("<tr><th>{}</th>", m_allele));
            for cell in &abo_cells[row] {
                html.push_str(&format!("<td class=\"abo-{}\">{}</td>", cell, cell));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n");

        let (dad_rh, mum_rh, rh_cells) = punnett_grid::<RhSystem>(father.rh, mother.rh);
        html.push_str(&format!(
            "<h2>{}</h2>\n<p class=\"note\">{}</p>\n<table>\n<tr><th></th>",
            self.t(Text::RhSquareTitle),
            self.t(Text::RhSquareDesc)
        ));
        for allele in &dad_rh {
            html.push_str(&format!("<th>{}</th>", allele));
        }
        html.push_str("</tr>\n");
        for (row, m_allele) in mum_rh.iter().enumerate() {
            html.push_str(&format!("<tr><th>{}</th>", m_allele));
            for cell in &rh_cells[row] {
                let class = match cell {
                    RhFactor::Positive => "rh-pos",
                    RhFactor::Negative => "rh-neg",
                };
                html.push_str(&format!("<td class=\"{}\">{}</td>", class, cell));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n");

        html
    }

    fn html_distribution(&self, results: &AnalysisResults) -> String {
        let mut html = format!(
            "<h2>{}</h2>\n<table>\n<tr><th></th><th>%</th></tr>\n",
            self.t(Text::OutcomeProbabilities)
        );
        for outcome in results.abo_rh.outcomes() {
            html.push_str(&format!(
                "<tr><td class=\"abo-{}\">{}</td><td>{}</td></tr>\n",
                outcome.phenotype.abo,
                outcome.phenotype,
                format_percent(outcome.probability)
            ));
        }
        html.push_str("</table>\n");
        html
    }

    fn html_compatibility(&self, entries: &[CompatibilityEntry]) -> String {
        let mut html = format!(
            "<h2>{}</h2>\n<p class=\"note\">{}</p>\n<ul>\n",
            self.t(Text::CompatibilityChecker),
            self.t(Text::PossibleBabyTypes)
        );
        for entry in entries {
            html.push_str(&format!(
                "<li><strong>{}</strong> {} {} {} {}.</li>\n",
                entry.phenotype,
                self.t(Text::ReceiveFrom),
                join_labels(&entry.can_receive_from),
                self.t(Text::DonateTo),
                join_labels(&entry.can_donate_to)
            ));
        }
        html.push_str("</ul>\n");
        html
    }

    fn html_relative_donation(&self) -> String {
        format!(
            "<div class=\"warning\"><strong>{}</strong> {}</div>\n",
            self.t(Text::RelativeDonationTitle),
            self.t(Text::RelativeDonationBody)
        )
    }

    fn html_risks(&self, results: &AnalysisResults) -> String {
        let findings = results.findings(self.lang);
        if findings.is_empty() {
            return String::new();
        }

        let mut html = format!(
            "<div class=\"risks\">\n<h2>{}</h2>\n",
            self.t(Text::GeneticRisks)
        );
        for finding in findings {
            html.push_str(&format!(
                "<div><strong>{}</strong><br>{}</div>\n",
                finding.title, finding.description
            ));
        }
        html.push_str("</div>\n");
        html
    }

    fn html_extra_systems(&self, results: &AnalysisResults) -> String {
        if results.kell.is_none() && results.mn.is_none() && results.duffy.is_none() {
            return String::new();
        }

        let mut html = format!("<h2>{}</h2>\n", self.t(Text::OtherSystems));
        if let (Some(pair), Some(dist)) = (results.parents.kell, &results.kell) {
            html.push_str(&self.html_extra_panel(self.t(Text::KellTitle), pair, dist));
        }
        if let (Some(pair), Some(dist)) = (results.parents.mn, &results.mn) {
            html.push_str(&self.html_extra_panel(self.t(Text::MnTitle), pair, dist));
        }
        if let (Some(pair), Some(dist)) = (results.parents.duffy, &results.duffy) {
            html.push_str(&self.html_extra_panel(self.t(Text::DuffyTitle), pair, dist));
        }
        html
    }

    fn html_extra_panel<P: Clone + PartialEq + Display>(
        &self,
        title: &str,
        pair: ParentPair<P>,
        distribution: &Distribution<P>,
    ) -> String {
        let mut html = format!(
            "<h3>{}</h3>\n<p>{} <strong>{}</strong> &middot; {} <strong>{}</strong></p>\n<ul>\n",
            title,
            self.t(Text::SelectorFather),
            pair.father,
            self.t(Text::SelectorMother),
            pair.mother
        );
        for outcome in distribution.outcomes() {
            html.push_str(&format!(
                "<li><strong>{}</strong>: {}</li>\n",
                outcome.phenotype,
                format_percent(outcome.probability)
            ));
        }
        html.push_str("</ul>\n");
        html
    }

    /* ---------- json ---------- */

    fn generate_json_report(&self, results: &AnalysisResults) -> Result<()> {
        let path = self.report_path("json")?;
        let mut value =
            serde_json::to_value(results).context("Failed to serialize analysis results")?;
        value["findings"] = serde_json::to_value(results.findings(self.lang))
            .context("Failed to serialize risk findings")?;
        let json = serde_json::to_string_pretty(&value)?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
        Ok(())
    }

    /* ---------- csv ---------- */

    fn generate_csv_report(&self, results: &AnalysisResults) -> Result<()> {
        let path = self.report_path("csv")?;
        let mut writer = Writer::from_path(&path)
            .with_context(|| format!("Failed to write CSV report to {}", path.display()))?;

        writer.write_record(["system", "phenotype", "count", "probability"])?;
        write_csv_rows(&mut writer, BloodGroupSystem::AboRh, results.abo_rh.outcomes())?;
        if let Some(dist) = &results.kell {
            write_csv_rows(&mut writer, BloodGroupSystem::Kell, dist.outcomes())?;
        }
        if let Some(dist) = &results.mn {
            write_csv_rows(&mut writer, BloodGroupSystem::Mn, dist.outcomes())?;
        }
        if let Some(dist) = &results.duffy {
            write_csv_rows(&mut writer, BloodGroupSystem::Duffy, dist.outcomes())?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn write_csv_rows<P: Clone + PartialEq + Display, W: std::io::Write>(
    writer: &mut Writer<W>,
    system: BloodGroupSystem,
    outcomes: &[Outcome<P>],
) -> Result<()> {
    for outcome in outcomes {
        writer.write_record([
            system.to_string(),
            outcome.phenotype.to_string(),
            outcome.count.to_string(),
            outcome.probability.to_string(),
        ])?;
    }
    Ok(())
}

fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Join labels for prose, injecting the translated "or" before the last
/// item ("A, B, or O")
fn human_join<T: Display>(items: &[T], or_word: &str) -> String {
    let labels: Vec<String> = items.iter().map(|i| i.to_string()).collect();
    match labels.len() {
        0 => String::new(),
        1 => labels[0].clone(),
        2 => format!("{} {} {}", labels[0], or_word, labels[1]),
        _ => format!(
            "{}, {} {}",
            labels[..labels.len() - 1].join(", "),
            or_word,
            labels[labels.len() - 1]
        ),
    }
}

fn join_labels<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Distinct gametes in first-seen order, for the "can pass on" summary
fn unique<T: Copy + PartialEq>(items: &[T]) -> Vec<T> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(item) {
            seen.push(*item);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BloodGroupAnalyzer, ParentPhenotypes};

    fn sample_results() -> AnalysisResults {
        let parents =
            ParentPhenotypes::new("A+".parse().unwrap(), "O-".parse().unwrap());
        BloodGroupAnalyzer::new().analyze(&parents).unwrap()
    }

    #[test]
    fn html_report_contains_squares_and_risks() {
        let generator = ReportGenerator::new(Path::new("./reports"), Lang::En);
        let html = generator.create_html_content(&sample_results());
        assert!(html.contains("ABO Punnett square"));
        assert!(html.contains("Rh Punnett square"));
        assert!(html.contains("Possible genetic / immune concerns"));
        assert!(html.contains("rh-pos"));
    }

    #[test]
    fn html_report_localizes() {
        let generator = ReportGenerator::new(Path::new("./reports"), Lang::Bn);
        let html = generator.create_html_content(&sample_results());
        assert!(html.contains("<html lang=\"bn\">"));
        assert!(html.contains("ABO পানেট স্কয়ার"));
    }

    #[test]
    fn human_join_uses_the_word_before_the_last_item() {
        assert_eq!(human_join(&["A"], "or"), "A");
        assert_eq!(human_join(&["A", "O"], "or"), "A or O");
        assert_eq!(human_join(&["A", "B", "O"], "or"), "A, B, or O");
    }

    #[test]
    fn unique_preserves_first_seen_order() {
        assert_eq!(unique(&[2, 1, 2, 3, 1]), vec![2, 1, 3]);
    }
}
