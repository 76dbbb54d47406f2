use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use folio_core::{
    FolioConfig, Interaction, MemoryStore, MemorySurface, Node, Page, Region, RenderContext,
};
use folio_data::parse_site_data_str;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "folio-cli",
    about = "Dựng trang portfolio ngoại tuyến từ file dữ liệu JSON."
)]
struct Args {
    /// Đường dẫn tới file JSON dữ liệu trang (dạng `SITE_DATA`).
    #[arg(short, long)]
    input: PathBuf,

    /// Từ khóa lọc công bố.
    #[arg(short, long)]
    query: Option<String>,

    /// Danh mục kỹ năng (`all`, `robotics`, `ml`, ...).
    #[arg(long)]
    skill_group: Option<String>,

    /// Từ khóa lọc kỹ năng theo tên.
    #[arg(long)]
    skill_query: Option<String>,

    /// Ghi timeline kinh nghiệm ra file SVG.
    #[arg(long)]
    svg: Option<PathBuf>,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 220.0)]
    height: f64,

    /// In kết quả lọc dạng JSON.
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "folio_core=debug,folio_data=debug,folio_cli=debug,info"
    } else {
        "folio_cli=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let data = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Không đọc được file {:?}", args.input))?;
    let site = parse_site_data_str(&data)
        .with_context(|| format!("File {:?} không phải JSON hợp lệ", args.input))?;

    let mut surface = MemorySurface::with_all_regions();
    surface.insert(Region::ExperienceViz).size = (args.width, args.height);

    let ctx = RenderContext::now();
    let mut page = Page::new(site, MemoryStore::new(), &FolioConfig::default());
    page.mount(&mut surface, &ctx);

    let mut interactions = Vec::new();
    if let Some(query) = &args.query {
        interactions.push(Interaction::SearchPublications(query.clone()));
    }
    if let Some(group) = &args.skill_group {
        interactions.push(Interaction::SelectSkillTab(group.clone()));
    }
    if let Some(query) = &args.skill_query {
        interactions.push(Interaction::SearchSkills(query.clone()));
    }
    for interaction in &interactions {
        page.dispatch(interaction, &mut surface, &ctx);
    }

    if args.json {
        let output = serde_json::json!({
            "publications": page.publications().visible(),
            "pending": surface
                .children(Region::PendingList)
                .iter()
                .map(Node::text_content)
                .collect::<Vec<_>>(),
            "skills": page.skills().visible(),
            "timeline": page.timeline().layout(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Publications [{}]:", page.publications().query());
        for record in page.publications().visible() {
            println!(
                "  {} ({}): {}",
                record.title,
                record.year,
                record.authors.join(", ")
            );
        }

        println!("Pending:");
        for item in surface.children(Region::PendingList) {
            println!("  {}", item.text_content());
        }

        println!("Skills [{}]:", page.skills().category().as_str());
        for skill in page.skills().visible() {
            println!("  {} ({})", skill.name, skill.group.label());
        }

        match page.timeline().layout() {
            Some(layout) => println!(
                "Timeline: {} bars, {} year ticks",
                layout.bars.len(),
                layout.ticks.len()
            ),
            None => println!("Timeline: no experience entries"),
        }
    }

    if let Some(path) = &args.svg {
        let layout = page
            .timeline()
            .layout()
            .context("Không có mục kinh nghiệm nào để vẽ timeline")?;
        std::fs::write(path, layout.to_svg())
            .with_context(|| format!("Không ghi được file {path:?}"))?;
        info!(path = ?path, "đã ghi timeline SVG");
    }

    Ok(())
}
