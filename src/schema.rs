table! {
    foods (id) {
        id -> Integer,
        name -> Varchar,
        calories -> Double,
        proteins -> Double,
        fats -> Double,
        carbs -> Double,
        fiber -> Double,
        sugar -> Double,
        sodium -> Double,
    }
}
