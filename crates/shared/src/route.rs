use std::fmt;

/// Mount point of the client routes.
pub const BASE_PATH: &str = "/static/react_app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Recipes,
    NewRecipe,
    Recipe(String),
    EditRecipe(String),
    MealPlans,
    NewMealPlan,
    MealPlan(String),
    EditMealPlan(String),
}

impl Route {
    pub fn path(&self) -> String {
        let path = match self {
            Route::Recipes => "/recipes".to_owned(),
            Route::NewRecipe => "/recipes/new".to_owned(),
            Route::Recipe(id) => format!("/recipes/{}", urlencoding::encode(id)),
            Route::EditRecipe(id) => format!("/recipes/{}/edit", urlencoding::encode(id)),
            Route::MealPlans => "/meal-plans".to_owned(),
            Route::NewMealPlan => "/meal-plans/new".to_owned(),
            Route::MealPlan(id) => format!("/meal-plans/{}", urlencoding::encode(id)),
            Route::EditMealPlan(id) => format!("/meal-plans/{}/edit", urlencoding::encode(id)),
        };

        format!("{BASE_PATH}{path}")
    }

    /// Navigation section the route belongs to.
    pub fn section(&self) -> &'static str {
        match self {
            Route::Recipes | Route::NewRecipe | Route::Recipe(_) | Route::EditRecipe(_) => {
                "recipes"
            }
            _ => "meal-plans",
        }
    }

    /// Maps a request path to a client route. The bare base path maps to the
    /// recipe list, trailing slashes are ignored.
    pub fn resolve(path: &str) -> Option<Route> {
        let rest = path.strip_prefix(BASE_PATH)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }

        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        // Ids that do not decode to UTF-8 match no route.
        let id = |raw: &str| urlencoding::decode(raw).ok().map(|id| id.into_owned());

        let route = match segments.as_slice() {
            [] | ["recipes"] => Route::Recipes,
            ["recipes", "new"] => Route::NewRecipe,
            ["recipes", raw] => Route::Recipe(id(raw)?),
            ["recipes", raw, "edit"] => Route::EditRecipe(id(raw)?),
            ["meal-plans"] => Route::MealPlans,
            ["meal-plans", "new"] => Route::NewMealPlan,
            ["meal-plans", raw] => Route::MealPlan(id(raw)?),
            ["meal-plans", raw, "edit"] => Route::EditMealPlan(id(raw)?),
            _ => return None,
        };

        Some(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
