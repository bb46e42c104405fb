use crate::flow::Notice;

/// UI strings for one interface language.
pub struct Strings {
    pub choose_language: &'static str,
    pub choose_group: &'static str,
    pub make_sentence: &'static str,
    pub correct: &'static str,
    pub incorrect: &'static str,
    pub congratulations: &'static str,
    pub great_job: &'static str,
    /// `{count}` is replaced with the number of sentences
    pub completed_sentences: &'static str,
    pub random: &'static str,
    pub answer_prefix: &'static str,
    pub sentences: &'static str,
    pub next: &'static str,
    pub finish: &'static str,
    pub sound_on: &'static str,
    pub sound_off: &'static str,
    pub fell_back: &'static str,
    pub load_failed: &'static str,
    pub empty_group: &'static str,
    pub keys_language: &'static str,
    pub keys_group: &'static str,
    pub keys_playing: &'static str,
    pub keys_complete: &'static str,
}

const EN: Strings = Strings {
    choose_language: "Choose your language",
    choose_group: "Choose sentence group",
    make_sentence: "Make the sentence",
    correct: "Correct! Well done!",
    incorrect: "Incorrect. Try again! You can correct your answer above.",
    congratulations: "Congratulations! You've finished all sentences!",
    great_job: "Great job!",
    completed_sentences: "You've completed all {count} sentences.",
    random: "Random (all sentences)",
    answer_prefix: "Answer:",
    sentences: "sentences",
    next: "enter: next",
    finish: "enter: finish",
    sound_on: "sound on",
    sound_off: "sound off",
    fell_back: "Failed to load {failed} sentences. Falling back to {fallback}.",
    load_failed: "Failed to load {failed} sentences.",
    empty_group: "The group {group} has no sentences.",
    keys_language: "↑↓: move | enter: select | esc: quit",
    keys_group: "↑↓: move | enter: select | backspace: languages | esc: quit",
    keys_playing: "←→: move | ↑↓: row | enter: pick/remove | ?: answer | ctrl+r: reset | tab: restart | ctrl+s: sound | ctrl+g: groups | esc: quit",
    keys_complete: "tab/enter: play again | g: groups | l: languages | esc: quit",
};

const RU: Strings = Strings {
    choose_language: "Выберите язык",
    choose_group: "Выберите группу предложений",
    make_sentence: "Составьте предложение",
    correct: "Правильно! Отлично!",
    incorrect: "Неправильно. Попробуйте еще раз! Вы можете исправить ответ выше.",
    congratulations: "Поздравляем! Вы завершили все предложения!",
    great_job: "Отличная работа!",
    completed_sentences: "Вы завершили все {count} предложений.",
    random: "Случайно (все предложения)",
    answer_prefix: "Ответ:",
    sentences: "предложений",
    next: "enter: следующее",
    finish: "enter: завершить",
    sound_on: "звук вкл",
    sound_off: "звук выкл",
    fell_back: "Не удалось загрузить {failed}. Используется {fallback}.",
    load_failed: "Не удалось загрузить {failed}.",
    empty_group: "В группе {group} нет предложений.",
    keys_language: "↑↓: выбор | enter: ок | esc: выход",
    keys_group: "↑↓: выбор | enter: ок | backspace: языки | esc: выход",
    keys_playing: "←→: выбор | ↑↓: ряд | enter: взять/убрать | ?: ответ | ctrl+r: сброс | tab: заново | ctrl+s: звук | ctrl+g: группы | esc: выход",
    keys_complete: "tab/enter: играть снова | g: группы | l: языки | esc: выход",
};

/// Unknown codes get English.
pub fn strings(language: &str) -> &'static Strings {
    match language {
        "ru" => &RU,
        _ => &EN,
    }
}

pub fn language_name(code: &str) -> String {
    match code {
        "en" => "English".to_string(),
        "ru" => "Русский".to_string(),
        "es" => "Español".to_string(),
        "de" => "Deutsch".to_string(),
        "fr" => "Français".to_string(),
        other => other.to_uppercase(),
    }
}

pub fn completed(strings: &Strings, count: usize) -> String {
    strings.completed_sentences.replace("{count}", &count.to_string())
}

pub fn notice(strings: &Strings, notice: &Notice) -> String {
    match notice {
        Notice::FellBack { failed, fallback } => strings
            .fell_back
            .replace("{failed}", &language_name(failed))
            .replace("{fallback}", &language_name(fallback)),
        Notice::LoadFailed { language } => strings.load_failed.replace("{failed}", &language_name(language)),
        Notice::EmptyGroup { group } => strings.empty_group.replace("{group}", group),
    }
}
