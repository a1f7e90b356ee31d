pub mod article;
pub mod settings;
pub mod user;

pub use article::{ArticleRepository, ArticleRepositoryTrait, ArticleUpdate, NewArticle};
pub use settings::{SettingsRepository, SettingsRepositoryTrait};
pub use user::{UserRepository, UserRepositoryTrait};

#[cfg(test)]
pub use article::MockArticleRepositoryTrait;
#[cfg(test)]
pub use settings::MockSettingsRepositoryTrait;
#[cfg(test)]
pub use user::MockUserRepositoryTrait;
