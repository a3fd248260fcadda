//! Sample Tamil inputs for trying each mode.

use tamil_assist::primitives::Mode;

/// Sentences with deliberate grammatical slips.
pub const GRAMMAR_SAMPLES: [&str; 5] = [
    "எனக்கு மிகவும் சந்தோஷமாக இருக்கிறது. நான் புத்தகங்களை படிக்கிறேன்.",
    "நான் இந்த மாதிரியான செய்திகள நம்பவில்லை.",
    "உங்களுக்கு எப்படி இருக்கிறீர்கள்? நான் நல்லா இருக்கிறேன்.",
    "அவர் கேட்டனான்.",
    "அவள் படிக்கிறான்",
];

/// Longer passages suited to summarization. The second one embeds an English
/// word and is rejected by validation.
pub const SUMMARY_SAMPLES: [&str; 3] = [
    "தமிழகத்தின் வரலாற்று செழுமை மிகுந்த காலகட்டங்களில் இருந்து, பெரும்பாலான பழங்கால தமிழ் நாட்டு மக்களின் வாழ்க்கை, நாகரிகம், கலாசாரம், மற்றும் அவர்களின் கலைப்பண்புகள் நம்மை நவீன உலகின் வண்ணங்களுடன் இணைக்கின்றன. சோழர், சேட்டியர், பாண்டியர், மற்றும் கல்லரைக்குள் வாழ்ந்த தமிழ் மக்களின் உயரிய மரபுகளும், ஆன்மீக பக்கங்களும், வரலாற்றுப் பரந்த பரப்புகளை எடுத்துக்காட்டுகின்றன. தமிழகத்தின் மரபின் இச்செழுமை, தற்போது நம்முடைய உயிர்த்தொகுப்புகளுக்கு நமக்குத் தேவையான செல்வாக்கையும், சிறந்த கல்வியையும் வழங்குகிறது. இந்நிலையில், பழங்காலச் சாகசங்கள், தலமைகள், கலைகளும், வணிகப் பரிமாற்றங்களும் தமிழகத்தின் உலகளாவிய அளவிலான அடையாளமாக திகழ்கின்றன.",
    "இந்து தத்துவத்தின் அடிப்படையைப் புரிந்து கொள்ளும் போது, வாழ்க்கையின் பல்வேறு பரிமாணங்கள் தொடர்புடையவையாக உள்ளன என்பதை புரிந்து கொள்ளலாம். இந்த தத்துவத்தில், ஆன்மிகம் மற்றும் materialism ஆகியவற்றின் மையமாக நிற்கும் அர்த்தங்களை நம் வாழ்க்கையில் ஒரு பொருத்தமான மற்றும் அமைதியான நிலையை உருவாக்குவதற்கு உதவுகின்றன. உலகின் அனைத்து கலாச்சாரங்களும் வாழ்க்கையின் மிக முக்கியமான அம்சங்களை முன்னணி இடத்தில் வைத்திருக்கின்றன. இந்த அடிப்படையில், வாழ்க்கை என்னும் பயணத்தின் எல்லா தரப்புகளிலும் சுயவிவரத்தை மேம்படுத்துவதற்கும், தன்னம்பிக்கையுடன் மாறும் உலகத்திற்கும் தயாராக இருக்க உதவுகிறது. இதன் மூலம், நம் வாழ்க்கை உயர் அடிப்படையில் இருக்கும் என்பது தெளிவாக நம்பக்கூடியது.",
    "தற்காலிக வளர்ச்சியின் மூலம், உலகம் இன்று மாறுபட்ட கால நிலைகளை அனுபவிக்கிறது. தொழில்நுட்ப முன்னேற்றம் மற்றும் அறிவியல் கண்டுபிடிப்புகள், மனிதனின் அடுத்தடுத்த செழிப்புகளை உருவாக்குவதாக அமைந்துள்ளன. புதிய கண்டுபிடிப்புகள், இதற்கான பல்வேறு செயல்முறைகள், மற்றும் மனிதன் வாழ்க்கையின் முன்னேற்றத்தை எவ்வாறு அடையலாம் என்பதற்கான வழிமுறைகள் ஆகியவை, ஒரு புதிய கோணத்தில் பொருந்துகின்றன. இதனாலேயே, உலகம் மாறும் போது, அதனை முழுமையாக அணுகுவதற்கும், அது எப்படி செயல்படுகிறதோ அதை புரிந்துகொள்ளுவதற்கும் உதவுகின்றன. இது, தற்காலிகப் பரிமாணங்களை அடையாளம் காண வேண்டிய அவசியத்தை உணர்த்துகிறது.",
];

/// Returns the sample at `index` for `mode`, wrapping past the end of the list.
#[must_use]
pub fn sample(mode: Mode, index: usize) -> &'static str {
    let samples: &[&str] = match mode {
        Mode::GrammarCheck(_) => &GRAMMAR_SAMPLES,
        Mode::Summarize(_) => &SUMMARY_SAMPLES,
    };
    samples[index % samples.len()]
}
