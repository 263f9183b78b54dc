//! Wealth Calculators CLI
//!
//! Runs SIP and NPS projections and queries the calculator directory

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use wealth_calc::catalog::{CatalogListing, CategoryFilter, DEFAULT_FEATURED_LIMIT};
use wealth_calc::format::rupees;
use wealth_calc::projection::{NpsBounds, NpsGrowthPoint, SipBounds};
use wealth_calc::{
    CatalogIndex, CatalogQuery, CatalogQueryEngine, NpsInput, NpsPolicy, NpsProjector, NpsResult,
    SipInput, SipProjector, SipResult, SortMode,
};

#[derive(Debug, Parser)]
#[command(name = "wealth_calc", version, about = "SIP/NPS projections and calculator directory")]
struct Cli {
    /// Print JSON instead of a text table
    #[arg(long, global = true)]
    json: bool,

    /// Load the directory from this folder instead of the built-in copy
    #[arg(long, global = true, value_name = "DIR")]
    catalog: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a Systematic Investment Plan
    Sip {
        #[arg(long, default_value_t = 5000.0)]
        amount: f64,
        /// Expected annual return in percent
        #[arg(long, default_value_t = 12.0)]
        rate: f64,
        #[arg(long, default_value_t = 10)]
        years: u32,
        /// Include the year-wise growth series
        #[arg(long)]
        series: bool,
        /// Enforce the calculator's accepted input ranges
        #[arg(long)]
        strict: bool,
    },
    /// Project a National Pension System account
    Nps {
        #[arg(long, default_value_t = 5000.0)]
        amount: f64,
        #[arg(long, default_value_t = 30)]
        current_age: u32,
        #[arg(long, default_value_t = 60)]
        retirement_age: u32,
        /// Expected annual return in percent
        #[arg(long, default_value_t = 10.0)]
        expected_rate: f64,
        /// Annuity yield in percent
        #[arg(long, default_value_t = 6.0)]
        annuity_rate: f64,
        #[arg(long)]
        lumpsum_fraction: Option<f64>,
        #[arg(long)]
        tax_bracket: Option<f64>,
        #[arg(long)]
        series: bool,
        #[arg(long)]
        strict: bool,
    },
    /// Most used featured calculators
    Featured {
        #[arg(long, default_value_t = DEFAULT_FEATURED_LIMIT)]
        limit: usize,
    },
    /// Search the calculator directory
    Search {
        #[arg(long, default_value = "")]
        text: String,
        /// Category key or "all"
        #[arg(long, default_value = "all")]
        category: String,
        /// popular, newest or recommended
        #[arg(long, default_value = "popular")]
        sort: SortMode,
        /// Print results in per-category sections
        #[arg(long)]
        grouped: bool,
    },
    /// List directory categories
    Categories,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NpsReport<'a> {
    #[serde(flatten)]
    result: &'a NpsResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    growth_series: Option<Vec<NpsGrowthPoint>>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Sip {
            amount,
            rate,
            years,
            series,
            strict,
        } => {
            let projector = if strict {
                SipProjector::with_bounds(SipBounds::default())
            } else {
                SipProjector::new()
            };
            let input = SipInput {
                monthly_investment: amount,
                annual_return_rate_percent: rate,
                years,
            };
            let result = projector.project(&input).context("SIP projection failed")?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_sip(&result, series);
            }
        }
        Command::Nps {
            amount,
            current_age,
            retirement_age,
            expected_rate,
            annuity_rate,
            lumpsum_fraction,
            tax_bracket,
            series,
            strict,
        } => {
            let defaults = NpsPolicy::default();
            let policy = NpsPolicy {
                lumpsum_fraction: lumpsum_fraction.unwrap_or(defaults.lumpsum_fraction),
                tax_bracket: tax_bracket.unwrap_or(defaults.tax_bracket),
            };
            let mut projector = NpsProjector::new(policy);
            if strict {
                projector = projector.with_bounds(NpsBounds::default());
            }
            let input = NpsInput {
                monthly_contribution: amount,
                current_age,
                retirement_age,
                expected_return_rate_percent: expected_rate,
                annuity_return_rate_percent: annuity_rate,
            };
            let result = projector.project(&input).context("NPS projection failed")?;
            let growth_series = if series {
                Some(projector.growth_series(&input)?)
            } else {
                None
            };

            if cli.json {
                print_json(&NpsReport {
                    result: &result,
                    growth_series,
                })?;
            } else {
                print_nps(&result, growth_series.as_deref());
            }
        }
        Command::Featured { limit } => {
            let loaded = load_catalog(cli.catalog.as_deref())?;
            let engine = CatalogQueryEngine::new(loaded.as_ref().unwrap_or(CatalogIndex::builtin()));
            let listings = engine.listings(&engine.list_featured(limit));
            if cli.json {
                print_json(&listings)?;
            } else {
                print_listings(&listings);
            }
        }
        Command::Search {
            text,
            category,
            sort,
            grouped,
        } => {
            let loaded = load_catalog(cli.catalog.as_deref())?;
            let engine = CatalogQueryEngine::new(loaded.as_ref().unwrap_or(CatalogIndex::builtin()));
            let query = CatalogQuery::new()
                .text(text)
                .category(CategoryFilter::from(category))
                .sort(sort);

            if grouped {
                let groups = engine.grouped(&query);
                if cli.json {
                    print_json(&groups)?;
                } else {
                    for group in &groups {
                        println!("{} ({})", group.category.name, group.entries.len());
                        print_listings(&engine.listings(&group.entries));
                        println!();
                    }
                }
            } else {
                let listings = engine.listings(&engine.search(&query));
                if cli.json {
                    print_json(&listings)?;
                } else if listings.is_empty() {
                    println!("No calculators match.");
                } else {
                    print_listings(&listings);
                }
            }
        }
        Command::Categories => {
            let loaded = load_catalog(cli.catalog.as_deref())?;
            let index = loaded.as_ref().unwrap_or(CatalogIndex::builtin());
            if cli.json {
                print_json(&index.categories())?;
            } else {
                for category in index.categories() {
                    let count = index
                        .entries()
                        .iter()
                        .filter(|e| e.category_key == category.key)
                        .count();
                    println!("{:<12} {:<16} {:>3} calculators", category.key, category.name, count);
                }
            }
        }
    }

    Ok(())
}

fn load_catalog(dir: Option<&std::path::Path>) -> Result<Option<CatalogIndex>> {
    dir.map(|path| {
        CatalogIndex::from_csv_path(path)
            .with_context(|| format!("Unable to load catalog from {}", path.display()))
    })
    .transpose()
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_sip(result: &SipResult, series: bool) {
    println!("SIP Projection");
    println!("==============");
    println!("  Invested Amount:  {:>16}", rupees(result.total_invested));
    println!("  Est. Returns:     {:>16}", rupees(result.total_returns));
    println!("  Total Value:      {:>16}", rupees(result.future_value));
    println!("  Wealth Gain:      {:>15.2}x", result.wealth_gain_ratio());

    if series {
        println!();
        println!("{:>4} {:>16} {:>16}", "Year", "Invested", "Value");
        println!("{}", "-".repeat(38));
        for point in &result.growth_series {
            println!(
                "{:>4} {:>16} {:>16}",
                point.year_index,
                rupees(point.invested_so_far.round() as u64),
                rupees(point.projected_value.round() as u64)
            );
        }
    }
}

fn print_nps(result: &NpsResult, series: Option<&[NpsGrowthPoint]>) {
    println!("NPS Projection ({} years, {} contributions)", result.years, result.periods);
    println!("==========================================");
    println!("  Total Investment: {:>16}", rupees(result.total_investment));
    println!("  Total Returns:    {:>16}", rupees(result.total_returns));
    println!("  Maturity Corpus:  {:>16}", rupees(result.maturity_corpus));
    println!("  Lumpsum:          {:>16}", rupees(result.lumpsum));
    println!("  Annuity Purchase: {:>16}", rupees(result.annuity_amount));
    println!("  Monthly Pension:  {:>16}", rupees(result.monthly_pension));
    println!("  Tax Saved / Year: {:>16}", rupees(result.tax_saved));

    if let Some(points) = series {
        println!();
        println!("{:>4} {:>16} {:>16}", "Age", "Invested", "Corpus");
        println!("{}", "-".repeat(38));
        for p in points {
            println!(
                "{:>4} {:>16} {:>16}",
                p.age,
                rupees(p.point.invested_so_far.round() as u64),
                rupees(p.point.projected_value.round() as u64)
            );
        }
    }
}

fn print_listings(listings: &[CatalogListing<'_>]) {
    for listing in listings {
        let marker = if listing.entry.featured { "*" } else { " " };
        println!(
            "{} {:<20} {:<22} {:>8}  {}",
            marker,
            listing.entry.id,
            listing.entry.title,
            listing.entry.usage_count,
            listing.category.name
        );
    }
}
