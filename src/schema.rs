// Diesel table definitions for the Perch database.

diesel::table! {
    users (id) {
        id -> BigInt,
        username -> Text,
        email -> Text,
        password_hash -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    posts (id) {
        id -> BigInt,
        author_id -> BigInt,
        content -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    likes (id) {
        id -> BigInt,
        user_id -> BigInt,
        post_id -> BigInt,
        created_at -> Text,
    }
}

diesel::table! {
    follows (id) {
        id -> BigInt,
        follower_id -> BigInt,
        followed_id -> BigInt,
        created_at -> Text,
    }
}

diesel::table! {
    sessions (token) {
        token -> Text,
        user_id -> BigInt,
        created_at -> Text,
        expires_at -> Text,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::joinable!(likes -> posts (post_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, posts, likes, follows, sessions);
