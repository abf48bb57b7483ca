use api_client::{ApiClient, SuggestionSource};
use clap::{Parser, Subcommand};
use eolmadak_core::{process, SortKey};
use eolmadak_types::{ReportRequest, SearchTerm};

#[derive(Parser)]
#[command(name = "eolmadak")]
#[command(about = "얼마닥 non-covered treatment price comparison CLI")]
struct Cli {
    /// Backend base URL (defaults to EOLMADAK_API_BASE_URL or localhost)
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Query autocomplete suggestions
    Suggest {
        #[command(subcommand)]
        kind: SuggestKind,
    },
    /// Fetch a price report and print one page
    Report {
        /// Canonical treatment code (e.g. CZ100A)
        #[arg(long)]
        clinic_code: String,
        /// Hospital display name (optional)
        #[arg(long)]
        hospital: Option<String>,
        /// Province code (optional)
        #[arg(long)]
        sido: Option<String>,
        /// District code (optional, takes precedence server-side)
        #[arg(long)]
        siggu: Option<String>,
        /// Sort order: price-asc or price-desc
        #[arg(long, default_value = "price-asc")]
        sort: String,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Items per page
        #[arg(long, default_value_t = 10)]
        page_size: usize,
    },
    /// Show the current session state
    Session,
}

#[derive(Subcommand)]
enum SuggestKind {
    /// Treatment-name suggestions
    Treatments { term: String },
    /// Region suggestions
    Locations { term: String },
    /// Hospital-name suggestions, optionally scoped to a region code
    Hospitals {
        term: String,
        #[arg(long)]
        scope: Option<String>,
    },
}

fn base_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("EOLMADAK_API_BASE_URL").ok())
        .unwrap_or_else(|| "http://localhost:8080".into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = ApiClient::new(&base_url(cli.base_url))?;

    match cli.command {
        Some(Commands::Suggest { kind }) => match kind {
            SuggestKind::Treatments { term } => {
                let term = SearchTerm::new(&term)?;
                match client.treatments(&term).await {
                    Ok(candidates) if candidates.is_empty() => println!("No suggestions."),
                    Ok(candidates) => {
                        for candidate in candidates {
                            println!("{}\t{}", candidate.clinic_code, candidate.clinic_name);
                        }
                    }
                    Err(e) => eprintln!("Error fetching treatment suggestions: {}", e),
                }
            }
            SuggestKind::Locations { term } => {
                let term = SearchTerm::new(&term)?;
                match client.locations(&term).await {
                    Ok(locations) if locations.is_empty() => println!("No suggestions."),
                    Ok(locations) => {
                        for location in locations {
                            println!("{}\t{}", location.scope_code(), location.location_name);
                        }
                    }
                    Err(e) => eprintln!("Error fetching location suggestions: {}", e),
                }
            }
            SuggestKind::Hospitals { term, scope } => {
                let term = SearchTerm::new(&term)?;
                match client.hospitals(&term, scope.as_deref()).await {
                    Ok(names) if names.is_empty() => println!("No suggestions."),
                    Ok(names) => {
                        for name in names {
                            println!("{}", name);
                        }
                    }
                    Err(e) => eprintln!("Error fetching hospital suggestions: {}", e),
                }
            }
        },
        Some(Commands::Report {
            clinic_code,
            hospital,
            sido,
            siggu,
            sort,
            page,
            page_size,
        }) => {
            let sort_key: SortKey = sort.parse()?;
            let request = ReportRequest {
                clinic_code,
                hospital_name: hospital,
                sido_code: sido,
                siggu_code: siggu,
            };
            match client.fetch_report(&request).await {
                Ok(snapshot) => {
                    let report = &snapshot.report;
                    println!("검색 결과 {}건", report.result_count);
                    if !report.ai_comment.is_empty() {
                        println!("AI 분석: {}", report.ai_comment);
                    }
                    if report.list.is_empty() {
                        println!("검색 결과가 없습니다.");
                    } else {
                        let result_page = process(&report.list, sort_key, page, page_size);
                        println!("-- page {}/{} --", page, result_page.total_pages.max(1));
                        for item in &result_page.page_items {
                            println!(
                                "{}\t{}\t{}\t{}",
                                item.hospital_name,
                                item.location,
                                item.treatment_name,
                                item.price_label()
                            );
                        }
                    }
                }
                Err(e) => eprintln!("Error fetching report: {}", e),
            }
        }
        Some(Commands::Session) => {
            let session = client.fetch_session().await;
            match session.user() {
                Some(user) => match &user.email {
                    Some(email) => println!("Signed in as {} <{}>", user.name, email),
                    None => println!("Signed in as {}", user.name),
                },
                None => println!("Not signed in."),
            }
        }
        None => {
            println!("Use 'eolmadak --help' for commands");
        }
    }

    Ok(())
}
