
fn main() {
    use shape_distance_field::prelude::*;
    use vek::Vec2;

    let mut field = f32_field(255).unwrap();

    field
        .add_shape(
            "triangle",
            vec![
                Vec2::new(40.0, 40.0),
                Vec2::new(40.0, 140.0),
                Vec2::new(140.0, 40.0),
            ],
            Some(42),
        )
        .unwrap();

    field
        .add_shape(
            "box",
            vec![
                Vec2::new(170.0, 160.0),
                Vec2::new(240.0, 160.0),
                Vec2::new(240.0, 230.0),
                Vec2::new(170.0, 230.0),
            ],
            Some(180),
        )
        .unwrap();

    let side = field.side() as u32;
    let data = field.generate_image_data();

    let image = image::RgbaImage::from_raw(side, side, data)
        .expect("buffer matches the grid dimensions");

    image.save("distance_field.png").unwrap();
}
