use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use synteny::prelude::*;
use tempfile::tempdir;

fn toy_ideogram(debug: bool) -> LinearIdeogram {
    let config = IdeogramConfig {
        debug,
        ..IdeogramConfig::default()
    };
    LinearIdeogram::from_seqlens_file("tests/data/toy_seqlens.tsv", config).unwrap()
}

#[test]
fn test_draw_from_files() {
    let mut ideo = toy_ideogram(true);
    let mut pairs = read_synteny("tests/data/human_chimp_synteny.tsv").unwrap();
    let layer = draw_synteny(&mut ideo, &mut pairs).unwrap();

    let scene = ideo.scene();
    let regions = scene.children(layer);
    assert_eq!(regions.len(), pairs.len());
    assert_eq!(scene.synteny_regions(), regions);

    let polygon = scene.children(regions[0])[0];
    assert_eq!(scene.attr(polygon, "points"), Some("10, 0 10, 4 200, 6 200, 2"));
    assert!(pairs.iter().all(|p| p.r1.is_resolved() && p.r2.is_resolved()));
}

#[test]
fn test_isolate_and_write_svg() {
    let mut ideo = toy_ideogram(false);
    let mut pairs = read_synteny("tests/data/human_chimp_synteny.tsv").unwrap();
    let layer = draw_synteny(&mut ideo, &mut pairs).unwrap();
    let regions = ideo.scene().children(layer).to_vec();

    handle_pointer_event(&mut ideo, regions[1], PointerEvent::Click).unwrap();
    let hidden: Vec<bool> = regions
        .iter()
        .map(|&r| region_state(ideo.scene(), r).hidden)
        .collect();
    assert_eq!(hidden, vec![true, false, true, true]);

    let dir = tempdir().unwrap();
    let output_path = dir.path().join("synteny.svg.gz");
    let output_path = output_path.to_str().unwrap();
    let (width, height) = ideo.canvas_size();
    ideo.scene()
        .write_svg(Some(output_path), width, height)
        .unwrap();

    let mut svg = String::new();
    GzDecoder::new(File::open(output_path).unwrap())
        .read_to_string(&mut svg)
        .unwrap();
    assert!(svg.contains(r#"id="1_200_900___2_700_1300""#));
    assert!(svg.contains(r#"class="syntenicRegion hidden""#));
    assert!(svg.contains("fill: #F99; fill-opacity: 0.5"));
    assert_eq!(svg.matches("<polygon").count(), 4);
    assert_eq!(svg.matches(r#"class="syntenyBorder""#).count(), 8);
}

#[test]
fn test_unknown_chromosome_stops_render() {
    let seqlens = indexmap_seqlens();
    let mut ideo = LinearIdeogram::new(&seqlens, IdeogramConfig::default()).unwrap();
    let mut pairs = read_synteny("tests/data/human_chimp_synteny.tsv").unwrap();
    // chromosome 3 is missing from this genome, so the last pair fails
    let result = draw_synteny(&mut ideo, &mut pairs);
    assert!(matches!(result, Err(SyntenyError::NoChrom(name)) if name == "3"));
    assert_eq!(ideo.scene().synteny_regions().len(), 3);
}

fn indexmap_seqlens() -> indexmap::IndexMap<String, Position> {
    let mut seqlens = indexmap::IndexMap::new();
    seqlens.insert("1".to_string(), 10_000);
    seqlens.insert("2".to_string(), 5_000);
    seqlens
}
