//! Shape catalog and rotation tests

use tui_blockfall::core::{get_shape, shape_count, ShapeMatrix};
use tui_blockfall::types::PieceKind;

#[test]
fn test_catalog_has_seven_tetrominoes() {
    assert_eq!(shape_count(), 7);
    for kind in PieceKind::ALL {
        assert_eq!(get_shape(kind).filled_count(), 4, "{:?}", kind);
    }
}

#[test]
fn test_catalog_order_and_dimensions() {
    let dims: Vec<(u8, u8)> = PieceKind::ALL
        .iter()
        .map(|&k| (get_shape(k).rows(), get_shape(k).cols()))
        .collect();
    // I, T, O, S, Z, J, L
    assert_eq!(
        dims,
        vec![(1, 4), (2, 3), (2, 2), (2, 3), (2, 3), (2, 3), (2, 3)]
    );
}

#[test]
fn test_catalog_layouts() {
    let t = ShapeMatrix::from_grid(&[&[1, 1, 1], &[0, 1, 0]]).unwrap();
    let s = ShapeMatrix::from_grid(&[&[0, 1, 1], &[1, 1, 0]]).unwrap();
    let j = ShapeMatrix::from_grid(&[&[1, 0, 0], &[1, 1, 1]]).unwrap();
    let l = ShapeMatrix::from_grid(&[&[0, 0, 1], &[1, 1, 1]]).unwrap();
    assert_eq!(*get_shape(PieceKind::T), t);
    assert_eq!(*get_shape(PieceKind::S), s);
    assert_eq!(*get_shape(PieceKind::J), j);
    assert_eq!(*get_shape(PieceKind::L), l);
}

#[test]
fn test_rotation_produces_new_matrix() {
    let template = *get_shape(PieceKind::T);
    let rotated = get_shape(PieceKind::T).rotated_cw();

    // T rotated clockwise: 01/11/01
    let expected = ShapeMatrix::from_grid(&[&[0, 1], &[1, 1], &[0, 1]]).unwrap();
    assert_eq!(rotated, expected);
    // The catalog entry is untouched
    assert_eq!(*get_shape(PieceKind::T), template);
}

#[test]
fn test_four_rotations_are_identity() {
    for kind in PieceKind::ALL {
        let m = *get_shape(kind);
        assert_eq!(m.rotated_cw().rotated_cw().rotated_cw().rotated_cw(), m, "{:?}", kind);
    }
}

#[test]
fn test_odd_rotations_swap_dimensions() {
    for kind in PieceKind::ALL {
        let m = get_shape(kind);
        let r1 = m.rotated_cw();
        let r3 = r1.rotated_cw().rotated_cw();
        assert_eq!((r1.rows(), r1.cols()), (m.cols(), m.rows()));
        assert_eq!((r3.rows(), r3.cols()), (m.cols(), m.rows()));
        if kind != PieceKind::O {
            assert_ne!(r1, *m, "{:?}", kind);
        }
    }
}

#[test]
fn test_o_is_rotation_invariant() {
    let o = get_shape(PieceKind::O);
    assert_eq!(o.rotated_cw(), *o);
}

#[test]
fn test_from_grid_rejects_bad_input() {
    assert!(ShapeMatrix::from_grid(&[]).is_none());
    assert!(ShapeMatrix::from_grid(&[&[1, 1], &[1]]).is_none());
    assert!(ShapeMatrix::from_grid(&[&[1, 1, 1, 1, 1]]).is_none());
}
