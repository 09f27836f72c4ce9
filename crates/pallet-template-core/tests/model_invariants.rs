use pallet_template_core::{BoxDims, Layer, PalletDims, Placement, Rotation};

fn p(id: u32, x: u32, y: u32, bw: u32, bh: u32) -> Placement {
    Placement {
        id,
        x,
        y,
        bw,
        bh,
        rotation: Rotation::Deg0,
    }
}

#[test]
fn layer_signature_is_order_independent() {
    let a = Layer(vec![p(0, 0, 0, 10, 10), p(1, 10, 0, 10, 10)]);
    let b = Layer(vec![p(1, 10, 0, 10, 10), p(0, 0, 0, 10, 10)]);
    assert_eq!(a.signature(), b.signature());
}

#[test]
fn layer_signature_differs_for_different_geometry() {
    let a = Layer(vec![p(0, 0, 0, 10, 10)]);
    let b = Layer(vec![p(0, 0, 0, 20, 10)]);
    assert_ne!(a.signature(), b.signature());
}

#[test]
fn is_valid_rejects_overlapping_boxes() {
    let layer = Layer(vec![p(0, 0, 0, 10, 10), p(1, 5, 5, 10, 10)]);
    let pallet = PalletDims::new(100, 100);
    let box_dims = BoxDims::new(10, 10, 1);
    assert!(!layer.is_valid(pallet, box_dims));
}

#[test]
fn is_valid_rejects_boxes_outside_the_pallet() {
    let layer = Layer(vec![p(0, 95, 0, 10, 10)]);
    let pallet = PalletDims::new(100, 100);
    let box_dims = BoxDims::new(10, 10, 1);
    assert!(!layer.is_valid(pallet, box_dims));
}

#[test]
fn is_valid_accepts_rotated_footprints() {
    let mut rotated = p(0, 0, 0, 10, 20);
    rotated.rotation = Rotation::Deg90;
    let layer = Layer(vec![rotated]);
    let pallet = PalletDims::new(100, 100);
    let box_dims = BoxDims::new(20, 10, 1);
    assert!(layer.is_valid(pallet, box_dims));
}

#[test]
fn placement_overlap_area_is_zero_for_disjoint_boxes() {
    let a = p(0, 0, 0, 10, 10);
    let b = p(1, 20, 20, 10, 10);
    assert_eq!(a.overlap_area(&b), 0);
}

#[test]
fn placement_overlap_area_matches_intersection_rectangle() {
    let a = p(0, 0, 0, 10, 10);
    let b = p(1, 5, 5, 10, 10);
    assert_eq!(a.overlap_area(&b), 25);
}
