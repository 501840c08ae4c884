use block_osc::{
    Config, Control, InputRate, MacroOscillator, OscillatorUnit, Shape, Unit, UnitArgs,
};

fn main() {
    tracing_subscriber::fmt::init();

    let cfg = Config {
        sample_rate: 4000.0,
        ..Default::default()
    };
    let args = UnitArgs {
        frequency: 110.0,
        rate: InputRate::Audio,
        shape: Shape::Csaw,
        ..Default::default()
    };
    let mut unit = OscillatorUnit::new(&cfg, args, MacroOscillator::new(cfg.sample_rate))
        .expect("valid config");

    let mut out_buf = vec![0.0f32; 64];

    for _ in 0..2 {
        unit.compute(Control::Block(110.0), &mut out_buf);

        for sample in out_buf.iter() {
            // output is at most half scale
            let width = 80;
            let zero = width / 2;
            let amp = (sample * 2.0 * zero as f32) as i32;
            let mut wave = String::new();
            for i in 0..width {
                if i == zero {
                    wave.push('|');
                } else if i == zero + amp {
                    wave.push('+');
                } else {
                    wave.push(' ');
                }
            }
            println!("{}", wave);
        }
    }
}
