use block_osc::{
    Config, InputRate, MacroOscillator, NoiseUnit, OscillatorUnit, Shape, Unit, UnitArgs,
    VoiceBank,
};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    Sample,
};

const DURATION_SECS: f32 = 4.0;
/// Largest mono block rendered per step inside the device callback.
const MAX_FRAMES: usize = 4096;

fn main() {
    tracing_subscriber::fmt::init();

    // Output
    let host = cpal::default_host();
    let out_dev = host
        .default_output_device()
        .expect("no output device available");
    let mut support_config_range = out_dev
        .supported_output_configs()
        .expect("No supported config");
    let config = support_config_range
        .find(|c| c.sample_format() == cpal::SampleFormat::F32)
        .expect("no supported output configuration")
        .with_max_sample_rate();

    let sample_rate = config.sample_rate().0 as f32;
    println!("Sample rate: {}", sample_rate);
    let channel_count = config.channels() as usize;
    println!("Channels: {}", channel_count);

    let cfg = Config {
        sample_rate,
        block_size: 256,
    };

    let mut bank: VoiceBank<Box<dyn Unit + Send>> = VoiceBank::new(&cfg, 8).expect("valid config");
    for (shape, hz) in [(Shape::Csaw, 110.0), (Shape::Triangle, 165.0), (Shape::Sine, 220.0)] {
        let args = UnitArgs {
            frequency: hz,
            rate: InputRate::Audio,
            shape,
            ..Default::default()
        };
        let unit = OscillatorUnit::new(&cfg, args, MacroOscillator::new(sample_rate))
            .expect("valid config");
        bank.add(Box::new(unit), hz, 0.5);
    }

    let ramp = OscillatorUnit::new(
        &cfg,
        UnitArgs {
            frequency: 55.0,
            ..Default::default()
        },
        MacroOscillator::new(sample_rate),
    )
    .expect("valid config");
    bank.add(Box::new(ramp), 55.0, 0.1);

    let noise = NoiseUnit::new(&cfg, 440.0, MacroOscillator::new(sample_rate), 7)
        .expect("valid config");
    bank.add(Box::new(noise), 440.0, 0.02);

    eprintln!("Voice bank ready with {} voices", bank.len());

    let stream = out_dev
        .build_output_stream(
            &config.config(),
            {
                let mut mono = vec![0.0f32; MAX_FRAMES];
                move |d: &mut [f32], _info| {
                    d.fill(Sample::EQUILIBRIUM);
                    for ch in d.chunks_mut(MAX_FRAMES * channel_count) {
                        let frames = ch.len() / channel_count;
                        bank.render(&mut mono[..frames]);
                        for (frame, &s) in ch.chunks_mut(channel_count).zip(mono.iter()) {
                            frame.fill(s);
                        }
                    }
                }
            },
            |e| eprintln!("stream error: {}", e),
            None,
        )
        .expect("failed to build output stream");

    stream.play().expect("failed to start stream");

    std::thread::sleep(std::time::Duration::from_secs_f32(DURATION_SECS));
}
