//! Prompt templates, per-service generation settings and the hand-written
//! fallback readings served when the generator is unavailable.

use super::providers::GenerationParams;
use crate::models::{BirthData, ContentRequest};

pub fn prompt_for(request: &ContentRequest) -> String {
    match request {
        ContentRequest::DailyHoroscope { sign } => format!(
            "Write a short daily horoscope for the zodiac sign {} for today. \
             Keep it positive and motivating, 150-200 words.",
            sign
        ),
        ContentRequest::WeeklyHoroscope { sign } => format!(
            "Write a detailed weekly horoscope for the zodiac sign {}. \
             Describe the main trends in love, work, health and finances for the coming week. \
             Length 300-400 words.",
            sign
        ),
        ContentRequest::Compatibility { first, second } => format!(
            "Analyse the compatibility between the zodiac signs {} and {}. \
             Describe the strengths and weaknesses of this relationship and its potential \
             in love, friendship and work. Give concrete advice for harmony. Length 250-300 words.",
            first, second
        ),
        ContentRequest::Tarot { spread } => format!(
            "Give a psychological reading with Tarot cards for the \"{}\" spread ({}). \
             Offer wise advice and an interpretation that helps with personal growth and \
             decision making. Be supportive and insightful. Length 300-350 words.",
            spread,
            spread.spread().label()
        ),
        ContentRequest::NatalChart { birth } => format!(
            "Write a natal chart interpretation for a person born on {}{}. \
             Cover personality traits, talents, strengths, growth areas and life lessons. \
             Length 400-500 words.",
            birth.date_label,
            place_suffix(birth)
        ),
    }
}

pub fn params_for(request: &ContentRequest) -> GenerationParams {
    match request {
        ContentRequest::Tarot { .. } => GenerationParams {
            temperature: Some(0.8),
            max_tokens: Some(2000),
        },
        ContentRequest::NatalChart { .. } => GenerationParams {
            temperature: Some(0.7),
            max_tokens: Some(2500),
        },
        ContentRequest::DailyHoroscope { .. }
        | ContentRequest::WeeklyHoroscope { .. }
        | ContentRequest::Compatibility { .. } => GenerationParams {
            temperature: Some(0.7),
            max_tokens: Some(2000),
        },
    }
}

pub fn fallback_for(request: &ContentRequest) -> String {
    match request {
        ContentRequest::DailyHoroscope { sign } => format!(
            "✨ Today's horoscope for {}:\n\n\
             Today brings you new opportunities! The stars favour bold decisions and active steps. \
             Focus on important tasks in the first half of the day; the afternoon is the time \
             for creativity and conversation.\n\n\
             Advice of the day: trust your intuition and don't be afraid to take the initiative. \
             Today is an especially good time to start new projects and make important connections.\n\n\
             Energy of the day: ⭐⭐⭐⭐☆\n\
             Have a great day! 🌟",
            sign
        ),
        ContentRequest::WeeklyHoroscope { sign } => format!(
            "✨ Weekly horoscope for {}:\n\n\
             Interesting events await you this week! Monday and Tuesday are for planning and \
             getting organised. Wednesday and Thursday bring unexpected chances at work. \
             Friday is ideal for socialising and meeting friends.\n\n\
             Spend the weekend resting and on self-development. Important insights may come \
             that help your personal growth.\n\n\
             Finances: stable, with a chance of unexpected income.\n\
             Health: keep work and rest in balance.\n\n\
             Have a great week! 🌟",
            sign
        ),
        ContentRequest::Compatibility { first, second } => format!(
            "💑 Compatibility of {} and {}:\n\n\
             These two signs have good potential for a harmonious relationship!\n\n\
             🌟 Strengths:\n\
             • Mutual respect and understanding\n\
             • Shared interests and values\n\
             • Supporting each other through hard times\n\n\
             ⚠️ Weaknesses:\n\
             • Disagreements over everyday matters\n\
             • Occasional misunderstandings from different temperaments\n\n\
             💡 Advice:\n\
             • Learn to listen and really hear each other\n\
             • Make time for shared rest and hobbies\n\
             • Respect your partner's personal space\n\
             • Talk openly about whatever comes up\n\n\
             Overall compatibility: 85% ⭐\n\
             Love: 80% ❤️\n\
             Friendship: 90% 🤝\n\
             Work: 75% 💼",
            first, second
        ),
        ContentRequest::Tarot { spread } => format!(
            "🃏 Tarot spread: {}\n\n\
             The cards show that you are at an important stage of your path! Now is the time \
             for deep reflection and well-weighed decisions.\n\n\
             ✨ Key messages:\n\
             • Strength points to your inner wisdom and your ability to overcome challenges\n\
             • The Star stands for hope and new opportunities on the horizon\n\
             • The World speaks of cycles closing and harmony reached\n\n\
             💫 Advice of the cards:\n\
             • Keep a balance between acting and waiting\n\
             • Trust your intuition when making decisions\n\
             • Don't be afraid to ask those close to you for help\n\
             • Set aside time for meditation and self-reflection\n\n\
             Remember: the cards only show potential, the final choice is always yours!",
            spread
        ),
        ContentRequest::NatalChart { birth } => format!(
            "🌌 Natal chart for a birth on {}{}\n\n\
             Your birth chart points to a strong, many-sided personality with great potential!\n\n\
             ✨ Core traits:\n\
             • Strong leadership and determination\n\
             • Well-developed intuition and empathy\n\
             • A creative approach to problems\n\
             • The ability to inspire others\n\n\
             🌟 Talents:\n\
             • Communication skills and a gift for persuasion\n\
             • An analytical mind\n\
             • An artistic view of the world\n\
             • Learning quickly\n\n\
             💫 Growth:\n\
             • Practise public speaking\n\
             • Keep learning all the time\n\
             • Balance work and rest to keep your energy up\n\
             • Develop emotional intelligence\n\n\
             🎯 Life lessons:\n\
             • Learn to delegate\n\
             • Be patient on the way to your goals\n\
             • Balance logic and intuition\n\n\
             Good luck on your path of self-development! 💫",
            birth.date_label,
            place_suffix(birth)
        ),
    }
}

fn place_suffix(birth: &BirthData) -> String {
    birth
        .place
        .as_deref()
        .map(|place| format!(" in {}", place))
        .unwrap_or_default()
}
