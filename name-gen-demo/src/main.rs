use log::info;
use name_gen_core::alias::{AttachmentTarget, transliterate};
use name_gen_core::model::generation_input::{LeadingWeighting, NameMode};
use name_gen_core::model::generator::Generator;
use name_gen_core::model::provider::Gender;
use name_gen_core::model::syllable::split_syllables;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Aliases are derived from display names
    for target in AttachmentTarget::ALL {
        println!("{} -> {} (tag '{}')", target.display_name(), target.alias(), target.tag());
    }
    println!("Пустыня Сахара -> {}", transliterate("Пустыня Сахара"));

    // Syllables are the building blocks of synthesized names
    println!("Альтаир -> {:?}", split_syllables("Альтаир"));

    // Load all corpora from the "data" directory (.dat files)
    // A compiled .bin cache is written next to each file and reused
    let generator = Generator::from_dir("./data")?;
    info!("loaded corpora: {:?}", generator.provider().corpus_names());

    let mut rng = rand::rng();

    // Default input narrowed to nation 1 and male names, sampled from the corpus
    let mut input = generator.make_generation_input();
    input.nation = Some(1);
    input.gender = Some(Gender::Male);
    for i in 0..5 {
        println!("Sampled name {}: {}", i + 1, generator.generate(&input, &mut rng)?);
    }

    // Synthesized names: leading fragment from corpus names, ending from corpus endings.
    // Retries up to 'nb_try' times while the result already exists in the corpus
    input.mode = NameMode::Synthesized;
    input.leading = LeadingWeighting::Uniform;
    input.nb_try = 10;
    for i in 0..5 {
        println!("Synthesized name {}: {}", i + 1, generator.generate(&input, &mut rng)?);
    }

    // Explicit fragments are used verbatim
    input.gender = Some(Gender::Female);
    input.set_first_syllable("лио")?;
    for i in 0..3 {
        println!("Name starting with 'лио' {}: {}", i + 1, generator.generate(&input, &mut rng)?);
    }

    // Blank or padded fragments are rejected
    match input.set_last_syllable(" гиль") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Rejected: {e}"),
    }

    Ok(())
}
