use padkit::{pad, FillParameters, Image, Mode, PadOutcome, Pixel};

fn main() {
    env_logger::init();

    let mut image = Image::new_empty_rgba8((16, 16));
    image.set_pixel((4, 4), Pixel::new(255, 0, 0, 255));
    image.set_pixel((11, 9), Pixel::new(0, 0, 255, 255));

    let params = FillParameters::auto(image.max_dimension());

    match pad(&image, Mode::AlphaDriven, params) {
        Ok(PadOutcome::Padded(padded)) => {
            for y in 0..16 {
                let row: Vec<_> = (0..16)
                    .map(|x| {
                        let pixel = padded.get_pixel((x, y));
                        if pixel.r > pixel.b {
                            'R'
                        } else {
                            'B'
                        }
                    })
                    .collect();

                println!("{}", row.into_iter().collect::<String>());
            }
        }
        Ok(PadOutcome::Unchanged) => println!("Nothing to pad"),
        Err(err) => eprintln!("Error: {}", err),
    }
}
