pub mod unsplash {

    pub const DEFAULT_BASE_URL: &str = "https://api.unsplash.com/";

    pub const SEARCH_PATH: &str = "search/photos";

    pub const PER_PAGE: u32 = 30;

    pub const ACCESS_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";
}

pub mod history {

    pub const DEFAULT_CAPACITY: usize = 5;

    pub const DEFAULT_KEY: &str = "searchHistory";

    pub const FILE_NAME: &str = "history.json";
}

pub const APP_NAME: &str = "imagesearcher";
