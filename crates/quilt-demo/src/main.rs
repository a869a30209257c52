//! Quilt demo.
//!
//! Builds a small feed out of stack and grid adapters, runs one layout pass at
//! the requested width and prints every frame as JSON.

mod loader;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use quilt_components::{
    ImageCollageComponent, ImageCollageView, ImageLabelComponent, LabelComponent,
    LabelGroupComponent, LabelGroupView, SharedImageLoader, TextAlignment, TextStyle,
};
use quilt_core::{Color, EdgeInsets, Rect, Size, View, ViewRef};
use quilt_layout::{
    AnyComponent, EmptyComponent, HorizontalAlignment, ReusableView, StackLayout,
    VerticalStackAdapter,
};

use loader::StaticImageLoader;

#[derive(Parser, Debug)]
#[command(name = "quilt-demo", about = "Lay out a sample feed and print the frames")]
struct Args {
    /// Width of the hosting view
    #[arg(long, default_value_t = 375.0)]
    width: f64,

    /// Columns in the photo collage
    #[arg(long, default_value_t = 3)]
    columns: usize,

    /// Clip the feed to this height instead of sizing it to fit
    #[arg(long)]
    height: Option<f64>,

    /// Background of the hosting view, as a hex color such as "#F2F2F7"
    #[arg(long, value_parser = parse_color)]
    background: Option<Color>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn parse_color(hex: &str) -> Result<Color, String> {
    Color::from_hex(hex).ok_or_else(|| format!("invalid hex color: {hex}"))
}

#[derive(Debug, Serialize)]
struct FrameDump {
    view: &'static str,
    frame: Rect,
    hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<Color>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<FrameDump>,
}

#[derive(Debug, Serialize)]
struct LayoutDump {
    size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    background: Option<Color>,
    views: Vec<FrameDump>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let dump = run(&args)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&dump)
    } else {
        serde_json::to_string(&dump)
    }
    .context("serializing layout")?;
    println!("{json}");
    Ok(())
}

fn run(args: &Args) -> Result<LayoutDump> {
    let loader = SharedImageLoader::new(sample_loader());

    let layout = StackLayout::new()
        .with_padding(EdgeInsets::uniform(16.0))
        .with_spacing(12.0)
        .with_alignment(HorizontalAlignment::Fill)
        .with_clipping(args.height.is_some());
    let mut adapter = VerticalStackAdapter::new(layout);
    adapter
        .set_components(feed(&loader, args.columns))
        .context("building feed")?;

    let mut host = ReusableView::new(adapter);
    host.set_background_color(args.background);
    let fitting = host
        .fitting_size(Size::unbounded_height(args.width))
        .context("measuring feed")?;
    let size = Size::new(args.width, args.height.unwrap_or(fitting.height));
    host.set_bounds_size(size);
    host.layout_if_needed().context("laying out feed")?;
    tracing::info!(width = size.width, height = size.height, "feed laid out");

    Ok(LayoutDump {
        size,
        background: host.background_color(),
        views: host.subviews().iter().map(dump_view).collect(),
    })
}

fn sample_loader() -> StaticImageLoader {
    (0..6)
        .fold(StaticImageLoader::default(), |loader, i| {
            loader.with_image(format!("photos/{i}.jpg"), 1200.0, 900.0)
        })
        .with_image("avatars/ada.png", 128.0, 128.0)
}

fn feed(loader: &SharedImageLoader, columns: usize) -> Vec<AnyComponent> {
    let title = TextStyle::default().with_font_size(24.0).with_weight(700);

    vec![
        AnyComponent::new(LabelComponent::new("Weekend in Lisbon").with_style(title)),
        AnyComponent::new(
            ImageLabelComponent::new("avatars/ada.png", "Ada shared 6 photos")
                .with_subtitle(LabelComponent::new("2 hours ago").with_color(Color::LIGHT_GRAY))
                .with_image_size(32.0, 32.0)
                .with_loader(loader.clone()),
        ),
        AnyComponent::new(
            ImageCollageComponent::new((0..6).map(|i| format!("photos/{i}.jpg")))
                .with_columns(columns)
                .with_spacing(4.0)
                .with_aspect_ratio(4.0 / 3.0)
                .with_loader(loader.clone()),
        ),
        AnyComponent::new(EmptyComponent),
        AnyComponent::new(
            LabelGroupComponent::new([
                LabelComponent::new("Trams, tiles and far too many pastéis de nata.")
                    .with_color(Color::from_rgb8(90, 90, 90))
                    .with_alignment(TextAlignment::Left)
                    .with_max_lines(3),
                LabelComponent::new("12 likes").with_style(TextStyle::default().with_font_size(12.0)),
            ])
            .with_spacing(4.0)
            .with_padding(EdgeInsets::uniform(8.0))
            .with_background_color(Color::from_rgb8(242, 242, 247)),
        ),
    ]
}

fn dump_view(view: &ViewRef) -> FrameDump {
    let view = view.borrow();
    let children = if let Some(collage) = view.downcast_ref::<ImageCollageView>() {
        collage.cells().iter().map(dump_view).collect()
    } else if let Some(group) = view.downcast_ref::<LabelGroupView>() {
        group.labels().iter().map(dump_view).collect()
    } else {
        Vec::new()
    };

    FrameDump {
        view: short_type_name(view.type_name()),
        frame: view.frame(),
        hidden: view.is_hidden(),
        background: view.background_color(),
        children,
    }
}

fn short_type_name(name: &'static str) -> &'static str {
    name.rsplit("::").next().unwrap_or(name)
}
