use terrain_core::{Channel, NoiseParameters, generate};

fn main() {
    // 64×64 field with the reference noise settings, seed 2025
    let params = NoiseParameters::square(2025, 64);
    let grid = match generate(&params) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("generation failed: {e}");
            return;
        }
    };

    // Print the top-left 12×12 corner of each channel
    for channel in Channel::ALL {
        println!("{:?}", channel);
        for y in 0..12 {
            for x in 0..12 {
                print!("{:>6.3} ", grid.get(x, y).channel(channel));
            }
            println!();
        }
        println!();
    }
}
