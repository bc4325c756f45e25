//! Integration tests for scene export (vellum-renderer).
//!
//! Tests SVG export over nested documents, gradient definitions, custom
//! configurations and edge cases.

use proptest::prelude::*;
use vellum_core::node::{Stroke, StrokeAlign, StrokeCap};
use vellum_core::{
    Container, CornerRadius, Document, EditorConfig, GradientStop, NodeKind, NodeRecord, Paint,
    Rgba8888, Scene, Transform,
};
use vellum_renderer::{paint_to_svg, ExportConfig, GradientIds, RenderError, SceneExporter};

fn stops() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, Rgba8888::new(255, 0, 0, 1.0)),
        GradientStop::new(1.0, Rgba8888::new(0, 0, 255, 1.0)),
    ]
}

fn linear(id: &str) -> Paint {
    Paint::LinearGradient {
        id: id.to_string(),
        transform: Transform::IDENTITY,
        stops: stops(),
    }
}

/// A page with a card holding a gradient badge and a label.
fn build_document() -> anyhow::Result<Document> {
    let mut doc = Document::new();
    doc.add_scene(Scene::new("page", "Page"))?;

    doc.insert(
        NodeRecord::new(
            "card",
            NodeKind::Container {
                corner_radius: CornerRadius::Uniform(8.0),
                clips_content: true,
            },
        )
        .with_transform(Transform::from_translation(10.0, 10.0))
        .with_size(300.0, 200.0)
        .with_fill(Paint::solid(Rgba8888::WHITE)),
        &Container::Scene("page".into()),
        None,
    )?;

    let card = Container::Node("card".into());
    doc.insert(
        NodeRecord::new("badge", NodeKind::Ellipse)
            .with_size(40.0, 40.0)
            .with_fill(linear("")),
        &card,
        None,
    )?;
    doc.insert(
        NodeRecord::new(
            "label",
            NodeKind::Text {
                text: "Q1 <draft>".to_string(),
                font_size: 16.0,
                font_family: "Inter".to_string(),
            },
        )
        .with_transform(Transform::from_translation(50.0, 10.0))
        .with_size(200.0, 20.0)
        .with_fill(Paint::solid(Rgba8888::BLACK)),
        &card,
        None,
    )?;
    Ok(doc)
}

// ==========================================================================
// Scene export tests
// ==========================================================================

#[test]
fn test_nested_export_order() -> anyhow::Result<()> {
    let svg = SceneExporter::with_defaults().render_to_svg(&build_document()?, &"page".into())?;

    let card = svg.find("id=\"card\"").expect("card group");
    let badge = svg.find("id=\"badge\"").expect("badge group");
    let label = svg.find("id=\"label\"").expect("label group");
    assert!(card < badge && badge < label);

    assert!(svg.contains("width=\"310\" height=\"210\""));
    assert!(svg.contains(">Q1 &lt;draft&gt;</text>"));
    assert!(svg.contains("<ellipse cx=\"20\" cy=\"20\" rx=\"20\" ry=\"20\" fill=\"url(#paint-0)\"/>"));
    Ok(())
}

#[test]
fn test_gradients_collected_into_defs() -> anyhow::Result<()> {
    let svg = SceneExporter::with_defaults().render_to_svg(&build_document()?, &"page".into())?;

    assert_eq!(svg.matches("<defs>").count(), 1);
    let defs = svg.find("<defs>").expect("defs");
    let first_group = svg.find("<g ").expect("group");
    assert!(defs < first_group);
    assert!(svg.contains("<linearGradient id=\"paint-0\""));
    Ok(())
}

#[test]
fn test_prefix_from_editor_config() -> anyhow::Result<()> {
    let config = EditorConfig::from_json(r#"{"gradient_id_prefix":"fx"}"#)?;
    let exporter = SceneExporter::new(ExportConfig::from(&config));
    let svg = exporter.render_to_svg(&build_document()?, &"page".into())?;
    assert!(svg.contains("url(#fx-0)"));
    Ok(())
}

#[test]
fn test_custom_size_and_no_background() -> anyhow::Result<()> {
    let mut doc = build_document()?;
    doc.update_scene(&"page".into(), |scene| {
        scene.background = Some(Paint::solid(Rgba8888::new(10, 20, 30, 1.0)));
    })?;

    let exporter = SceneExporter::new(ExportConfig {
        width: Some(1024.0),
        height: Some(768.0),
        background: false,
        ..ExportConfig::default()
    });
    let svg = exporter.render_to_svg(&doc, &"page".into())?;
    assert!(svg.contains("viewBox=\"0 0 1024 768\""));
    assert!(!svg.contains("rgba(10, 20, 30, 1)"));
    Ok(())
}

#[test]
fn test_stroke_attributes() -> anyhow::Result<()> {
    let mut doc = build_document()?;
    doc.update(&"badge".into(), |node| {
        node.stroke = Some(Stroke {
            paint: Paint::solid(Rgba8888::BLACK),
            width: 2.0,
            cap: StrokeCap::Round,
            align: StrokeAlign::Center,
        });
    })?;

    let svg = SceneExporter::with_defaults().render_to_svg(&doc, &"page".into())?;
    assert!(svg.contains("stroke=\"rgba(0, 0, 0, 1)\" stroke-width=\"2\" stroke-linecap=\"round\""));
    Ok(())
}

// ==========================================================================
// Edge cases
// ==========================================================================

#[test]
fn test_unsupported_paint_renders_no_fill() -> anyhow::Result<()> {
    let mut doc = build_document()?;
    doc.update(&"badge".into(), |node| {
        node.fill = Some(Paint::SweepGradient {
            id: String::new(),
            transform: Transform::IDENTITY,
            stops: stops(),
        });
    })?;

    let svg = SceneExporter::with_defaults().render_to_svg(&doc, &"page".into())?;
    assert!(svg.contains("<ellipse cx=\"20\" cy=\"20\" rx=\"20\" ry=\"20\" fill=\"none\"/>"));
    assert!(!svg.contains("<defs>"));
    Ok(())
}

#[test]
fn test_empty_scene() -> anyhow::Result<()> {
    let mut doc = Document::new();
    doc.add_scene(Scene::new("blank", "Blank"))?;
    let svg = SceneExporter::with_defaults().render_to_svg(&doc, &"blank".into())?;
    assert_eq!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"0\" height=\"0\" viewBox=\"0 0 0 0\"></svg>"
    );
    Ok(())
}

#[test]
fn test_unknown_scene_is_error() -> anyhow::Result<()> {
    let doc = build_document()?;
    let err = SceneExporter::with_defaults()
        .render_to_svg(&doc, &"missing".into())
        .unwrap_err();
    assert!(matches!(err, RenderError::SceneNotFound(_)));
    assert_eq!(err.to_string(), "Scene not found: missing");
    Ok(())
}

#[test]
fn test_named_gradients_keep_their_id() {
    let mut ids = GradientIds::new("paint");
    assert_eq!(paint_to_svg(&linear("brand"), &mut ids).reference(), "url(#brand)");
    assert_eq!(paint_to_svg(&linear(""), &mut ids).reference(), "url(#paint-0)");
}

proptest! {
    #[test]
    fn prop_gradient_transform_is_column_major(
        a in -10.0f64..10.0,
        b in -10.0f64..10.0,
        tx in -100.0f64..100.0,
        c in -10.0f64..10.0,
        d in -10.0f64..10.0,
        ty in -100.0f64..100.0,
    ) {
        let paint = Paint::LinearGradient {
            id: String::new(),
            transform: Transform::new(a, b, tx, c, d, ty),
            stops: stops(),
        };
        let svg = paint_to_svg(&paint, &mut GradientIds::default());
        let expected = format!("gradientTransform=\"matrix({a} {c} {b} {d} {tx} {ty})\"");
        prop_assert!(svg.definition().unwrap_or_default().contains(&expected));
    }

    #[test]
    fn prop_anonymous_ids_count_up(count in 1usize..20) {
        let mut ids = GradientIds::new("g");
        for i in 0..count {
            prop_assert_eq!(ids.assign(""), format!("g-{i}"));
        }
    }
}
