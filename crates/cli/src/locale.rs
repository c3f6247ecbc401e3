//! User-facing message catalogs.
//!
//! The language is chosen once at startup and carried by a [`Messages`]
//! value. Messages may contain `{placeholder}` fields which are filled in
//! with [`Messages::format`].

use std::collections::HashMap;

use leon::Template;
use sd_configurator_core::error::Result;

/// Shown before a language has been chosen, so it carries both languages.
pub const LANGUAGE_PROMPT: &str = "Select language / Выберите язык:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Russian,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Russian];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
        }
    }

    #[must_use]
    pub fn native_name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Русский",
        }
    }

    /// Looks a language up by its two-letter code. Unknown codes fall back to
    /// English.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|language| language.code() == code)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Title,
    SelectConfig,
    NoConfigs,
    LoadError,
    CurrentSettings,
    Model,
    Vae,
    SamplingMethod,
    ImageSize,
    Guidance,
    ClipSkip,
    Steps,
    Prompt,
    NegativePrompt,
    AdditionalParams,
    NotSet,
    MainMenu,
    MenuMethod,
    MenuSize,
    MenuGuidance,
    MenuClipSkip,
    MenuSteps,
    MenuPrompt,
    MenuNegative,
    MenuAdditional,
    Generate,
    Exit,
    SelectMethod,
    SelectHeight,
    SelectWidth,
    EnterGuidance,
    EnterClipSkip,
    EnterSteps,
    EnterPrompt,
    EnterNegative,
    EnterAdditional,
    NumberOutOfRange,
    AvailableEmbeddings,
    EmbeddingUsage,
    AvailableLoras,
    LoraUsage,
    EditPromptTitle,
    EditNegativeTitle,
    OutputPath,
    InvalidDir,
    CommandPreview,
    DryRun,
    ConfirmGenerate,
    GenerationStarted,
    GenerationSuccess,
    SavedTo,
    LastOutput,
    GenerationError,
    ErrorCode,
    UnknownExitCode,
    ErrorMessage,
    CriticalError,
    UsageError,
    GenerationCanceled,
    PressAnyKey,
}

impl MessageKey {
    pub const ALL: [MessageKey; 60] = [
        MessageKey::Title,
        MessageKey::SelectConfig,
        MessageKey::NoConfigs,
        MessageKey::LoadError,
        MessageKey::CurrentSettings,
        MessageKey::Model,
        MessageKey::Vae,
        MessageKey::SamplingMethod,
        MessageKey::ImageSize,
        MessageKey::Guidance,
        MessageKey::ClipSkip,
        MessageKey::Steps,
        MessageKey::Prompt,
        MessageKey::NegativePrompt,
        MessageKey::AdditionalParams,
        MessageKey::NotSet,
        MessageKey::MainMenu,
        MessageKey::MenuMethod,
        MessageKey::MenuSize,
        MessageKey::MenuGuidance,
        MessageKey::MenuClipSkip,
        MessageKey::MenuSteps,
        MessageKey::MenuPrompt,
        MessageKey::MenuNegative,
        MessageKey::MenuAdditional,
        MessageKey::Generate,
        MessageKey::Exit,
        MessageKey::SelectMethod,
        MessageKey::SelectHeight,
        MessageKey::SelectWidth,
        MessageKey::EnterGuidance,
        MessageKey::EnterClipSkip,
        MessageKey::EnterSteps,
        MessageKey::EnterPrompt,
        MessageKey::EnterNegative,
        MessageKey::EnterAdditional,
        MessageKey::NumberOutOfRange,
        MessageKey::AvailableEmbeddings,
        MessageKey::EmbeddingUsage,
        MessageKey::AvailableLoras,
        MessageKey::LoraUsage,
        MessageKey::EditPromptTitle,
        MessageKey::EditNegativeTitle,
        MessageKey::OutputPath,
        MessageKey::InvalidDir,
        MessageKey::CommandPreview,
        MessageKey::DryRun,
        MessageKey::ConfirmGenerate,
        MessageKey::GenerationStarted,
        MessageKey::GenerationSuccess,
        MessageKey::SavedTo,
        MessageKey::LastOutput,
        MessageKey::GenerationError,
        MessageKey::ErrorCode,
        MessageKey::UnknownExitCode,
        MessageKey::ErrorMessage,
        MessageKey::CriticalError,
        MessageKey::UsageError,
        MessageKey::GenerationCanceled,
        MessageKey::PressAnyKey,
    ];
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "Stable Diffusion Configurator",
        MessageKey::SelectConfig => "Select configuration file:",
        MessageKey::NoConfigs => "No configuration files available.",
        MessageKey::LoadError => "Error loading configuration: {error}",
        MessageKey::CurrentSettings => "Current settings: {name}",
        MessageKey::Model => "Model",
        MessageKey::Vae => "VAE",
        MessageKey::SamplingMethod => "Sampling method",
        MessageKey::ImageSize => "Image size",
        MessageKey::Guidance => "Guidance",
        MessageKey::ClipSkip => "CLIP skip",
        MessageKey::Steps => "Steps",
        MessageKey::Prompt => "Prompt",
        MessageKey::NegativePrompt => "Negative prompt",
        MessageKey::AdditionalParams => "Additional parameters",
        MessageKey::NotSet => "not set",
        MessageKey::MainMenu => "Select action:",
        MessageKey::MenuMethod => "1. Sampling method",
        MessageKey::MenuSize => "2. Image size",
        MessageKey::MenuGuidance => "3. Guidance level",
        MessageKey::MenuClipSkip => "4. CLIP skip",
        MessageKey::MenuSteps => "5. Number of steps",
        MessageKey::MenuPrompt => "6. Prompt",
        MessageKey::MenuNegative => "7. Negative prompt",
        MessageKey::MenuAdditional => "8. Additional parameters",
        MessageKey::Generate => "🚀 Start generation",
        MessageKey::Exit => "❌ Exit",
        MessageKey::SelectMethod => "Sampling method:",
        MessageKey::SelectHeight => "Image height:",
        MessageKey::SelectWidth => "Image width:",
        MessageKey::EnterGuidance => "Guidance level:",
        MessageKey::EnterClipSkip => "CLIP skip level:",
        MessageKey::EnterSteps => "Number of steps:",
        MessageKey::EnterPrompt => "Enter prompt:",
        MessageKey::EnterNegative => "Enter negative prompt:",
        MessageKey::EnterAdditional => "Additional parameters:",
        MessageKey::NumberOutOfRange => "Enter a number between {min} and {max}.",
        MessageKey::AvailableEmbeddings => "Available embedding models: {embeddings}",
        MessageKey::EmbeddingUsage => "To use embedding, just enter its name in the prompt.",
        MessageKey::AvailableLoras => "Available LORA models: {loras}",
        MessageKey::LoraUsage => "To use LORA use format: \"<lora:model_name:1.0>\"",
        MessageKey::EditPromptTitle => " Editing prompt ",
        MessageKey::EditNegativeTitle => " Editing negative prompt ",
        MessageKey::OutputPath => "Output path:",
        MessageKey::InvalidDir => "Directory does not exist!",
        MessageKey::CommandPreview => "Generated command:",
        MessageKey::DryRun => "Dry run is specified, not executing.",
        MessageKey::ConfirmGenerate => "Start generation with these parameters?",
        MessageKey::GenerationStarted => "Starting image generation...",
        MessageKey::GenerationSuccess => "✅ Generation completed successfully!",
        MessageKey::SavedTo => "Result saved to: {path}",
        MessageKey::LastOutput => "Last output lines:",
        MessageKey::GenerationError => "❌ Error executing command:",
        MessageKey::ErrorCode => "Error code: {code}",
        MessageKey::UnknownExitCode => "unknown",
        MessageKey::ErrorMessage => "Error: {message}",
        MessageKey::CriticalError => "❌ Critical error: {error}",
        MessageKey::UsageError => "❌ Cannot build command: {error}",
        MessageKey::GenerationCanceled => "Generation canceled.",
        MessageKey::PressAnyKey => "Press any key to continue.",
    }
}

fn russian(key: MessageKey) -> &'static str {
    match key {
        MessageKey::Title => "Stable Diffusion Конфигуратор",
        MessageKey::SelectConfig => "Выберите конфигурационный файл:",
        MessageKey::NoConfigs => "Нет доступных конфигурационных файлов.",
        MessageKey::LoadError => "Ошибка загрузки конфигурации: {error}",
        MessageKey::CurrentSettings => "Текущие настройки: {name}",
        MessageKey::Model => "Модель",
        MessageKey::Vae => "VAE",
        MessageKey::SamplingMethod => "Метод сэмплирования",
        MessageKey::ImageSize => "Размер изображения",
        MessageKey::Guidance => "Guidance",
        MessageKey::ClipSkip => "CLIP skip",
        MessageKey::Steps => "Шаги",
        MessageKey::Prompt => "Промпт",
        MessageKey::NegativePrompt => "Негативный промпт",
        MessageKey::AdditionalParams => "Дополнительные параметры",
        MessageKey::NotSet => "не задан",
        MessageKey::MainMenu => "Выберите действие:",
        MessageKey::MenuMethod => "1. Метод сэмплирования",
        MessageKey::MenuSize => "2. Размер изображения",
        MessageKey::MenuGuidance => "3. Уровень guidance",
        MessageKey::MenuClipSkip => "4. CLIP skip",
        MessageKey::MenuSteps => "5. Количество шагов",
        MessageKey::MenuPrompt => "6. Промпт",
        MessageKey::MenuNegative => "7. Негативный промпт",
        MessageKey::MenuAdditional => "8. Дополнительные параметры",
        MessageKey::Generate => "🚀 Начать генерацию",
        MessageKey::Exit => "❌ Выход",
        MessageKey::SelectMethod => "Метод сэмплирования:",
        MessageKey::SelectHeight => "Высота изображения:",
        MessageKey::SelectWidth => "Ширина изображения:",
        MessageKey::EnterGuidance => "Уровень guidance:",
        MessageKey::EnterClipSkip => "Уровень CLIP skip:",
        MessageKey::EnterSteps => "Количество шагов:",
        MessageKey::EnterPrompt => "Введите промпт:",
        MessageKey::EnterNegative => "Введите негативный промпт:",
        MessageKey::EnterAdditional => "Дополнительные параметры:",
        MessageKey::NumberOutOfRange => "Введите число от {min} до {max}.",
        MessageKey::AvailableEmbeddings => "Доступные embedding модели: {embeddings}",
        MessageKey::EmbeddingUsage => "Для использования embedding просто введите его название в промпте.",
        MessageKey::AvailableLoras => "Доступные LORA модели: {loras}",
        MessageKey::LoraUsage => "Для использования LORA используйте формат: \"<lora:название_модели:1.0>\"",
        MessageKey::EditPromptTitle => " Редактирование промпта ",
        MessageKey::EditNegativeTitle => " Редактирование негативного промпта ",
        MessageKey::OutputPath => "Путь для сохранения:",
        MessageKey::InvalidDir => "Директория не существует!",
        MessageKey::CommandPreview => "Собранная команда:",
        MessageKey::DryRun => "Указан пробный запуск, команда не выполняется.",
        MessageKey::ConfirmGenerate => "Запустить генерацию с этими параметрами?",
        MessageKey::GenerationStarted => "Начинаю генерацию изображения...",
        MessageKey::GenerationSuccess => "✅ Генерация успешно завершена!",
        MessageKey::SavedTo => "Результат сохранён в: {path}",
        MessageKey::LastOutput => "Последние строки вывода:",
        MessageKey::GenerationError => "❌ Ошибка при выполнении команды:",
        MessageKey::ErrorCode => "Код ошибки: {code}",
        MessageKey::UnknownExitCode => "неизвестен",
        MessageKey::ErrorMessage => "Ошибка: {message}",
        MessageKey::CriticalError => "❌ Критическая ошибка: {error}",
        MessageKey::UsageError => "❌ Невозможно собрать команду: {error}",
        MessageKey::GenerationCanceled => "Генерация отменена.",
        MessageKey::PressAnyKey => "Нажмите любую клавишу для продолжения.",
    }
}

/// The message catalog of the session language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Messages {
    language: Language,
}

impl Messages {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// The raw message text, placeholders included.
    #[must_use]
    pub fn get(&self, key: MessageKey) -> &'static str {
        match self.language {
            Language::English => english(key),
            Language::Russian => russian(key),
        }
    }

    /// The message text with its placeholders filled from `values`.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder has no value.
    pub fn format(&self, key: MessageKey, values: &[(&str, &str)]) -> Result<String> {
        let template = Template::parse(self.get(key))?;
        let context: HashMap<&str, &str> = values.iter().copied().collect();

        Ok(template.render(&context)?)
    }
}
