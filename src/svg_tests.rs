use regex::Regex;

use crate::config::{AlignmentMarkers, ExportOptions};
use crate::pattern::{EdgeDocument, FaceDocument, MeshDocument, Model};
use crate::vector_export::generate_svg;

fn quad(vertices: [u32; 4], origin: [f32; 2], side: f32) -> FaceDocument {
    let [u, v] = origin;
    FaceDocument {
        vertices: vertices.to_vec(),
        uvs: vec![[u, v], [u + side, v], [u + side, v + side], [u, v + side]],
    }
}

fn model(faces: Vec<FaceDocument>, edges: Vec<EdgeDocument>, num_vertices: usize) -> Model {
    Model::from_document(MeshDocument {
        name: String::from("shirt & sleeve"),
        uv_to_world_scale: 0.5,
        vertices: vec![[0.0; 3]; num_vertices],
        faces,
        edges,
    })
    .expect("valid mesh")
}

fn path_points(svg: &str) -> Vec<Vec<(f32, f32)>> {
    let re_path = Regex::new(r#"<path class="seam" d="([^"]*)"/>"#).unwrap();
    re_path
        .captures_iter(svg)
        .map(|cap| {
            cap[1]
                .split_whitespace()
                .filter(|tok| *tok != "M")
                .map(|pair| {
                    let (x, y) = pair.split_once(',').unwrap();
                    (x.parse().unwrap(), y.parse().unwrap())
                })
                .collect()
        })
        .collect()
}

#[test]
fn square_without_markers() {
    let model = model(vec![quad([0, 1, 2, 3], [0.2, 0.2], 0.5)], vec![], 4);
    let options = ExportOptions {
        alignment_markers: AlignmentMarkers::Off,
        show_piece_ids: false,
        ..ExportOptions::default()
    };
    let svg = generate_svg(&model, &options).unwrap();

    assert!(svg.contains(r#"viewBox="0 0 500 500" width="500mm" height="500mm""#));
    assert!(svg.contains("<title>shirt &amp; sleeve</title>"));
    let paths = path_points(&svg);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].len(), 5);
    assert_eq!(paths[0].first(), paths[0].last());
    let (x, y) = paths[0][0];
    assert!((x - 100.0).abs() < 1e-3 && (y - 400.0).abs() < 1e-3, "first point {x},{y}");
    assert!(!svg.contains("sewinguide\""));
    assert!(!svg.contains("<text"));
}

#[test]
fn shared_wire_draws_matching_guides() {
    // Two pieces joined by one wire edge from vertex 1 to vertex 4.
    let model = model(
        vec![
            quad([0, 1, 2, 3], [0.1, 0.1], 0.3),
            quad([4, 5, 6, 7], [0.6, 0.1], 0.3),
        ],
        vec![EdgeDocument {
            vertices: [1, 4],
            seam: true,
        }],
        8,
    );
    let options = ExportOptions {
        alignment_markers: AlignmentMarkers::Seam,
        ..ExportOptions::default()
    };
    let svg = generate_svg(&model, &options).unwrap();

    let re_line = Regex::new(r#"<line class="sewinguide" stroke="(#[0-9a-f]{6})""#).unwrap();
    let colors: Vec<&str> = re_line
        .captures_iter(&svg)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();
    assert_eq!(colors.len(), 2);
    assert_eq!(colors[0], colors[1]);

    let re_number = Regex::new(r#"<text class="alignment"[^>]*>(\d+)</text>"#).unwrap();
    let numbers: Vec<&str> = re_number
        .captures_iter(&svg)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();
    assert_eq!(numbers, vec!["0", "0"]);

    let re_piece = Regex::new(r#"<text class="pieceid"[^>]*>([A-Z]+)</text>"#).unwrap();
    let pieces: Vec<&str> = re_piece
        .captures_iter(&svg)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();
    assert_eq!(pieces, vec!["A", "B"]);
    assert_eq!(svg.matches("<g ").count(), 2);
}

#[test]
fn overlapping_numbers_are_shrunk() {
    // Two pieces with close corners, each with its own wire.
    let model = model(
        vec![
            FaceDocument {
                vertices: vec![0, 1, 2],
                uvs: vec![[0.1, 0.1], [0.5, 0.5], [0.1, 0.5]],
            },
            FaceDocument {
                vertices: vec![3, 4, 5],
                uvs: vec![[0.47, 0.5], [0.9, 0.5], [0.9, 0.9]],
            },
        ],
        vec![
            EdgeDocument { vertices: [1, 6], seam: true },
            EdgeDocument { vertices: [3, 7], seam: true },
        ],
        8,
    );
    let options = ExportOptions {
        alignment_markers: AlignmentMarkers::Seam,
        alignment_number_font_size: 30.0,
        ..ExportOptions::default()
    };
    let svg = generate_svg(&model, &options).unwrap();

    let re_size = Regex::new(r#"<text class="alignment" [^>]*font-size:([0-9.]+)px"#).unwrap();
    let sizes: Vec<f32> = re_size
        .captures_iter(&svg)
        .map(|c| c[1].parse().unwrap())
        .collect();
    assert_eq!(sizes.len(), 2);
    assert!(sizes.iter().any(|&s| s < 30.0));
    assert!(sizes.iter().all(|&s| s >= 1.0));
}

#[test]
fn hole_is_a_second_subpath() {
    // A frame of 8 quads around an empty middle cell.
    let mut faces = Vec::new();
    for row in 0..3u32 {
        for col in 0..3u32 {
            if row == 1 && col == 1 {
                continue;
            }
            let v0 = row * 4 + col;
            faces.push(quad(
                [v0, v0 + 1, v0 + 5, v0 + 4],
                [col as f32 * 0.25, row as f32 * 0.25],
                0.25,
            ));
        }
    }
    let model = model(faces, vec![], 16);
    let svg = generate_svg(&model, &ExportOptions::default()).unwrap();
    let re_path = Regex::new(r#"<path class="seam" d="([^"]*)"/>"#).unwrap();
    let d = &re_path.captures(&svg).unwrap()[1];
    assert_eq!(d.matches('M').count(), 2);
    assert_eq!(path_points(&svg)[0].len(), 13 + 5);
}

fn test_data_path(filename: &str) -> std::path::PathBuf {
    let mut d = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("demos");
    d.push(filename);
    d
}

#[test]
fn two_panels_demo() {
    let path = test_data_path("two_panels.json");
    let model = crate::pattern::import_model_file(&path).expect("Failed to load two_panels.json");
    let svg = generate_svg(&model, &ExportOptions::default()).expect("Failed to generate SVG");

    assert!(svg.contains(r#"width="400mm""#));
    assert_eq!(path_points(&svg).len(), 2);
    // two wires, each seen from both panels
    assert_eq!(svg.matches(r#"<line class="sewinguide""#).count(), 4);
    let re_number = Regex::new(r#"<text class="alignment"[^>]*>(\d+)</text>"#).unwrap();
    let mut numbers: Vec<&str> = re_number
        .captures_iter(&svg)
        .map(|c| c.get(1).unwrap().as_str())
        .collect();
    numbers.sort();
    assert_eq!(numbers, vec!["0", "0", "1", "1"]);
}
